//! Elasticsearch 索引封装 - 画作文档的薄透传层
//!
//! 职责：
//! - initialize / delete_index：索引生命周期（映射 + 自定义分析器）
//! - search：编译过滤条件 → 提交 _search → 还原画作记录
//! - create / get / delete：单文档透传
//!
//! 查询树到 ES DSL 的渲染也在这里完成，编译器本身不感知后端。
//! Query-tree rendering to Elasticsearch DSL also lives here; the compiler
//! itself stays backend-agnostic.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use super::query::{compile_query, CompositeQuery, PaintingSearchOptions, QueryClause};
use crate::models::{NewPainting, Painting, StoredPainting};

/// Search backend failure / 搜索后端错误
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("invalid search node url: {0}")]
    NodeUrl(#[from] url::ParseError),
    #[error("search backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search backend returned {status}: {body}")]
    Backend { status: StatusCode, body: String },
    #[error("malformed document {id}: bad createdDate ({reason})")]
    MalformedDocument { id: String, reason: String },
}

/// Painting search index / 画作搜索索引
pub struct PaintingsIndex {
    client: reqwest::Client,
    node: Url,
    index: String,
}

/// `_search` response body, only the parts we read / 仅反序列化用到的部分
#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: StoredPainting,
}

#[derive(Debug, Deserialize)]
struct GetResponseBody {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Option<StoredPainting>,
}

impl PaintingsIndex {
    /// 创建索引客户端 / Create an index client for the given node and index name
    pub fn new(node: &str, index: impl Into<String>) -> Result<Self, IndexError> {
        // join() 需要以 / 结尾的基址 / join() needs a trailing slash on the base
        let normalized = if node.ends_with('/') {
            node.to_string()
        } else {
            format!("{}/", node)
        };
        Ok(Self {
            client: reqwest::Client::new(),
            node: Url::parse(&normalized)?,
            index: index.into(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, IndexError> {
        if path.is_empty() {
            Ok(self.node.join(&self.index)?)
        } else {
            Ok(self.node.join(&format!("{}/{}", self.index, path))?)
        }
    }

    fn doc_url(&self, endpoint: &str, id: &str) -> Result<Url, IndexError> {
        self.url(&format!("{}/{}", endpoint, urlencoding::encode(id)))
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, IndexError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(IndexError::Backend { status, body })
    }

    /// 索引是否存在 / Whether the index exists
    pub async fn exists(&self) -> Result<bool, IndexError> {
        let response = self.client.head(self.url("")?).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(IndexError::Backend {
                status,
                body: String::new(),
            }),
        }
    }

    /// 创建索引（已存在则跳过）/ Create the index with mappings if absent
    ///
    /// Mappings mirror the document shape; `materialsDescription` goes
    /// through a custom analyzer whose char filter spells out comparison
    /// symbols before tokenization.
    pub async fn initialize(&self) -> Result<(), IndexError> {
        if self.exists().await? {
            tracing::debug!("Search index {} already exists", self.index);
            return Ok(());
        }

        let body = json!({
            "mappings": {
                "properties": {
                    "name": { "type": "keyword" },
                    "price": { "type": "integer" },
                    "isSold": { "type": "boolean" },
                    "createdDate": { "type": "date", "format": "epoch_millis" },
                    "author": { "type": "text", "analyzer": "standard" },
                    "contentDescription": { "type": "text", "analyzer": "english" },
                    "materialsDescription": { "type": "text", "analyzer": "materials_analyzer" },
                }
            },
            "settings": {
                "analysis": {
                    "analyzer": {
                        "materials_analyzer": {
                            "type": "custom",
                            "tokenizer": "standard",
                            "char_filter": ["symbol_mapper"],
                            "filter": ["lowercase"],
                        }
                    },
                    "char_filter": {
                        "symbol_mapper": {
                            "type": "mapping",
                            "mappings": [
                                "== => equal",
                                "> => greater than",
                                "< => lower than",
                            ],
                        }
                    }
                }
            }
        });

        let response = self.client.put(self.url("")?).json(&body).send().await?;
        Self::expect_success(response).await?;
        tracing::info!("Created search index {}", self.index);
        Ok(())
    }

    /// 删除索引（不存在则忽略）/ Delete the index if it exists
    pub async fn delete_index(&self) -> Result<(), IndexError> {
        if !self.exists().await? {
            return Ok(());
        }
        let response = self.client.delete(self.url("")?).send().await?;
        Self::expect_success(response).await?;
        tracing::info!("Deleted search index {}", self.index);
        Ok(())
    }

    /// 按过滤条件搜索画作 / Search paintings matching the filter options
    pub async fn search(
        &self,
        options: &PaintingSearchOptions,
    ) -> Result<Vec<Painting>, IndexError> {
        let query = compile_query(options);
        let body = json!({ "query": query.to_es() });
        tracing::debug!("Compiled search query: {}", body);

        let response = self
            .client
            .post(self.url("_search")?)
            .json(&body)
            .send()
            .await?;
        let parsed: SearchResponseBody = Self::expect_success(response).await?.json().await?;

        parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| {
                hit.source
                    .into_painting(hit.id.clone())
                    .map_err(|e| IndexError::MalformedDocument {
                        id: hit.id,
                        reason: e.to_string(),
                    })
            })
            .collect()
    }

    /// 创建画作文档并刷新索引 / Index a new painting document, then refresh
    ///
    /// Returns the generated document id. `createdDate` is stored as a
    /// decimal string per the index convention.
    pub async fn create(&self, painting: NewPainting) -> Result<String, IndexError> {
        let id = Uuid::new_v4().to_string();
        let document = StoredPainting::from(painting);

        let response = self
            .client
            .put(self.doc_url("_create", &id)?)
            .json(&document)
            .send()
            .await?;
        Self::expect_success(response).await?;

        // 立即刷新，保证后续搜索可见 / Refresh so the document is searchable right away
        let response = self.client.post(self.url("_refresh")?).send().await?;
        Self::expect_success(response).await?;

        tracing::debug!("Indexed painting {} ({})", document.name, id);
        Ok(id)
    }

    /// 按 id 获取画作 / Fetch one painting by id
    pub async fn get(&self, id: &str) -> Result<Option<Painting>, IndexError> {
        let response = self.client.get(self.doc_url("_doc", id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let parsed: GetResponseBody = Self::expect_success(response).await?.json().await?;
        match parsed.source {
            Some(source) => source
                .into_painting(parsed.id.clone())
                .map(Some)
                .map_err(|e| IndexError::MalformedDocument {
                    id: parsed.id,
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// 按 id 删除画作 / Delete one painting by id
    pub async fn delete(&self, id: &str) -> Result<(), IndexError> {
        let response = self.client.delete(self.doc_url("_doc", id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            // 幂等删除 / idempotent delete
            return Ok(());
        }
        Self::expect_success(response).await?;
        Ok(())
    }
}

impl CompositeQuery {
    /// 渲染为 Elasticsearch 查询 DSL / Render as Elasticsearch query DSL
    pub fn to_es(&self) -> Value {
        match self {
            CompositeQuery::MatchAll => json!({ "match_all": {} }),
            CompositeQuery::Must(clauses) => {
                let must: Vec<Value> = clauses.iter().map(QueryClause::to_es).collect();
                json!({ "bool": { "must": must } })
            }
        }
    }
}

impl QueryClause {
    /// 渲染单个子句 / Render one leaf clause
    pub fn to_es(&self) -> Value {
        match self {
            QueryClause::Wildcard { field, pattern } => json!({
                "wildcard": {
                    (*field): {
                        "value": pattern,
                        "case_insensitive": true,
                    }
                }
            }),
            QueryClause::NumericRange { field, gte, lte } => {
                let mut bounds = serde_json::Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), json!(gte));
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), json!(lte));
                }
                json!({ "range": { (*field): bounds } })
            }
            QueryClause::Term { field, value } => json!({ "term": { (*field): value } }),
            QueryClause::Match { field, query } => json!({ "match": { (*field): query } }),
            QueryClause::DateRange { field, range } => {
                let mut bounds = serde_json::Map::new();
                // 显式标注毫秒格式，后端不得猜测时间单位
                bounds.insert("format".to_string(), json!("epoch_millis"));
                if let Some(gte) = &range.gte {
                    bounds.insert("gte".to_string(), json!(gte));
                }
                if let Some(lte) = &range.lte {
                    bounds.insert("lte".to_string(), json!(lte));
                }
                if let Some(lt) = &range.lt {
                    bounds.insert("lt".to_string(), json!(lt));
                }
                json!({ "range": { (*field): bounds } })
            }
        }
    }
}
