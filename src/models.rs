//! Domain records / 领域模型
//!
//! `Painting` is the API shape with a numeric `createdDate`; stored
//! documents keep `createdDate` as a decimal epoch-millisecond string,
//! the same encoding the date-range normalizer emits for its bounds.
//! 存储文档中 createdDate 为十进制毫秒字符串，与日期归一化的编码一致。

use serde::{Deserialize, Serialize};

/// Painting listing / 画作条目
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Painting {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub is_sold: bool,
    /// Creation date, epoch milliseconds / 创建日期（毫秒时间戳）
    pub created_date: i64,
    pub author: Option<String>,
    pub content_description: Option<String>,
    pub materials_description: Option<String>,
}

/// Painting payload without an identifier, as submitted on creation / 新建画作
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPainting {
    pub name: String,
    pub price: i64,
    pub is_sold: bool,
    pub created_date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials_description: Option<String>,
}

/// Document shape persisted in the search index / 索引中的文档形态
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPainting {
    pub name: String,
    pub price: i64,
    pub is_sold: bool,
    /// Decimal epoch-millisecond string / 十进制毫秒字符串
    pub created_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials_description: Option<String>,
}

impl From<NewPainting> for StoredPainting {
    fn from(painting: NewPainting) -> Self {
        Self {
            name: painting.name,
            price: painting.price,
            is_sold: painting.is_sold,
            created_date: painting.created_date.to_string(),
            author: painting.author,
            content_description: painting.content_description,
            materials_description: painting.materials_description,
        }
    }
}

impl StoredPainting {
    /// Rebuild the API record from a stored document / 由存储文档还原 API 记录
    ///
    /// Fails when the stored `createdDate` string is not a decimal integer.
    pub fn into_painting(self, id: String) -> Result<Painting, std::num::ParseIntError> {
        let created_date = self.created_date.parse::<i64>()?;
        Ok(Painting {
            id,
            name: self.name,
            price: self.price,
            is_sold: self.is_sold,
            created_date,
            author: self.author,
            content_description: self.content_description,
            materials_description: self.materials_description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPainting {
        NewPainting {
            name: "Impression, Sunrise".to_string(),
            price: 1200,
            is_sold: false,
            created_date: 1_675_206_000_000,
            author: Some("Claude Monet".to_string()),
            content_description: None,
            materials_description: None,
        }
    }

    #[test]
    fn test_stored_painting_stringifies_created_date() {
        let stored = StoredPainting::from(sample());
        assert_eq!(stored.created_date, "1675206000000");
    }

    #[test]
    fn test_round_trip_through_storage_shape() {
        let stored = StoredPainting::from(sample());
        let painting = stored.into_painting("p1".to_string()).unwrap();
        assert_eq!(painting.id, "p1");
        assert_eq!(painting.created_date, 1_675_206_000_000);
        assert_eq!(painting.author.as_deref(), Some("Claude Monet"));
    }

    #[test]
    fn test_malformed_stored_date_is_rejected() {
        let mut stored = StoredPainting::from(sample());
        stored.created_date = "yesterday".to_string();
        assert!(stored.into_painting("p1".to_string()).is_err());
    }

    #[test]
    fn test_stored_document_omits_absent_fields() {
        let mut painting = sample();
        painting.author = None;
        let value = serde_json::to_value(StoredPainting::from(painting)).unwrap();
        assert!(value.get("author").is_none());
        assert_eq!(value["createdDate"], "1675206000000");
    }
}
