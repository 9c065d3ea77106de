//! Query construction - compile filter options into a composite boolean query / 查询构造
//!
//! Pure and total: no I/O, no failure path. Each defined filter field
//! contributes exactly one clause; all clauses are hard AND constraints.
//! 每个已定义的过滤字段恰好产生一个子句，所有子句为 AND 关系。

use serde::Deserialize;

use super::date_range::{created_date_range, DateRange};

/// Inclusive numeric range, either bound optional / 数值范围，上下界均可省略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RangeOptions {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Created-date filter: one calendar day or an explicit range / 创建日期过滤
///
/// A bare JSON number means "any moment inside that UTC calendar day";
/// an object means an explicit epoch-millisecond range. The distinction is
/// resolved once at deserialization, not re-inspected inside the compiler.
/// 裸数字表示某个 UTC 日历日内的任意时刻，对象表示显式毫秒范围。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CreatedDateFilter {
    /// Epoch-millisecond timestamp anywhere inside the target day / 目标日内任意时刻
    Day(i64),
    /// Explicit epoch-millisecond bounds, both inclusive / 显式毫秒范围
    Range(RangeOptions),
}

/// Painting search filters / 画作搜索过滤条件
///
/// Every field is independently optional; an absent field imposes no
/// constraint. `Some(false)` and `None` on `is_sold` are different filters.
/// 所有字段相互独立且可选，缺省即无约束。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaintingSearchOptions {
    /// Substring match on the painting name, case-insensitive / 名称子串匹配
    pub name: Option<String>,
    /// Inclusive price range / 价格范围
    pub price: Option<RangeOptions>,
    /// Exact sold/unsold match / 是否已售出
    pub is_sold: Option<bool>,
    /// Creation date, one day or a range / 创建日期
    pub created_date: Option<CreatedDateFilter>,
    /// Free-text relevance match on the author / 作者全文匹配
    pub author: Option<String>,
    /// Free-text relevance match on the content description / 内容描述全文匹配
    pub content_description: Option<String>,
    /// Free-text relevance match on the materials description / 材料描述全文匹配
    pub materials_description: Option<String>,
}

/// One atomic search constraint / 单个原子查询子句
#[derive(Debug, Clone, PartialEq)]
pub enum QueryClause {
    /// Case-insensitive substring match, wildcard on both sides / 大小写不敏感的子串匹配
    Wildcard { field: &'static str, pattern: String },
    /// Inclusive numeric range, absent bounds stay absent / 数值范围
    NumericRange {
        field: &'static str,
        gte: Option<i64>,
        lte: Option<i64>,
    },
    /// Exact boolean match / 精确布尔匹配
    Term { field: &'static str, value: bool },
    /// Free-text relevance match; analysis is the backend's job / 全文相关性匹配
    Match { field: &'static str, query: String },
    /// Epoch-millisecond date range / 日期范围
    DateRange { field: &'static str, range: DateRange },
}

/// Composite query tree handed to the search executor / 组合查询树
///
/// Write-only value, built fresh per search call. An empty filter set
/// compiles to `MatchAll`, never to an empty conjunction.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositeQuery {
    /// Matches every document in the index / 匹配索引中所有文档
    MatchAll,
    /// Conjunction: all child clauses must hold / 所有子句均须满足
    Must(Vec<QueryClause>),
}

impl CompositeQuery {
    /// Number of leaf clauses / 子句数量
    pub fn clause_count(&self) -> usize {
        match self {
            CompositeQuery::MatchAll => 0,
            CompositeQuery::Must(clauses) => clauses.len(),
        }
    }
}

/// Compile filter options into a composite query / 将过滤条件编译为组合查询
///
/// Clause order is fixed (name, price, createdDate, isSold, author,
/// contentDescription, materialsDescription) so output is reproducible.
/// Malformed ranges (min > max) are passed through uninterpreted.
pub fn compile_query(options: &PaintingSearchOptions) -> CompositeQuery {
    let mut must = Vec::new();

    if let Some(name) = &options.name {
        must.push(QueryClause::Wildcard {
            field: "name",
            pattern: format!("*{}*", name),
        });
    }

    if let Some(price) = &options.price {
        must.push(QueryClause::NumericRange {
            field: "price",
            gte: price.min,
            lte: price.max,
        });
    }

    if let Some(created) = &options.created_date {
        must.push(QueryClause::DateRange {
            field: "createdDate",
            range: created_date_range(created),
        });
    }

    if let Some(is_sold) = options.is_sold {
        must.push(QueryClause::Term {
            field: "isSold",
            value: is_sold,
        });
    }

    if let Some(author) = &options.author {
        must.push(QueryClause::Match {
            field: "author",
            query: author.clone(),
        });
    }

    if let Some(content) = &options.content_description {
        must.push(QueryClause::Match {
            field: "contentDescription",
            query: content.clone(),
        });
    }

    if let Some(materials) = &options.materials_description {
        must.push(QueryClause::Match {
            field: "materialsDescription",
            query: materials.clone(),
        });
    }

    if must.is_empty() {
        CompositeQuery::MatchAll
    } else {
        CompositeQuery::Must(must)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_compile_to_match_all() {
        let query = compile_query(&PaintingSearchOptions::default());
        assert_eq!(query, CompositeQuery::MatchAll);
        assert_eq!(query.clause_count(), 0);
    }

    #[test]
    fn test_clause_count_matches_defined_fields() {
        let options = PaintingSearchOptions {
            name: Some("sun".to_string()),
            price: Some(RangeOptions {
                min: Some(10),
                max: None,
            }),
            author: Some("Monet".to_string()),
            ..Default::default()
        };
        assert_eq!(compile_query(&options).clause_count(), 3);
    }

    #[test]
    fn test_name_compiles_to_double_wildcard() {
        let options = PaintingSearchOptions {
            name: Some("sun".to_string()),
            ..Default::default()
        };
        let query = compile_query(&options);
        assert_eq!(
            query,
            CompositeQuery::Must(vec![QueryClause::Wildcard {
                field: "name",
                pattern: "*sun*".to_string(),
            }])
        );
    }

    #[test]
    fn test_sold_flag_and_price_max() {
        // isSold=false 与 min 缺省都必须保留，不能被当作默认值丢弃
        let options = PaintingSearchOptions {
            is_sold: Some(false),
            price: Some(RangeOptions {
                min: None,
                max: Some(100),
            }),
            ..Default::default()
        };
        let query = compile_query(&options);
        assert_eq!(
            query,
            CompositeQuery::Must(vec![
                QueryClause::NumericRange {
                    field: "price",
                    gte: None,
                    lte: Some(100),
                },
                QueryClause::Term {
                    field: "isSold",
                    value: false,
                },
            ])
        );
    }

    #[test]
    fn test_absent_is_sold_adds_no_clause() {
        let unconstrained = PaintingSearchOptions::default();
        assert_eq!(compile_query(&unconstrained), CompositeQuery::MatchAll);

        let explicit_false = PaintingSearchOptions {
            is_sold: Some(false),
            ..Default::default()
        };
        assert_eq!(compile_query(&explicit_false).clause_count(), 1);
    }

    #[test]
    fn test_clause_order_is_stable() {
        let options = PaintingSearchOptions {
            name: Some("a".to_string()),
            price: Some(RangeOptions {
                min: Some(1),
                max: Some(2),
            }),
            is_sold: Some(true),
            created_date: Some(CreatedDateFilter::Range(RangeOptions {
                min: Some(0),
                max: None,
            })),
            author: Some("b".to_string()),
            content_description: Some("c".to_string()),
            materials_description: Some("d".to_string()),
        };
        let query = compile_query(&options);
        let CompositeQuery::Must(clauses) = query else {
            panic!("expected conjunction");
        };
        let fields: Vec<&str> = clauses
            .iter()
            .map(|c| match c {
                QueryClause::Wildcard { field, .. }
                | QueryClause::NumericRange { field, .. }
                | QueryClause::Term { field, .. }
                | QueryClause::Match { field, .. }
                | QueryClause::DateRange { field, .. } => *field,
            })
            .collect();
        assert_eq!(
            fields,
            vec![
                "name",
                "price",
                "createdDate",
                "isSold",
                "author",
                "contentDescription",
                "materialsDescription",
            ]
        );
    }

    #[test]
    fn test_created_date_deserializes_number_as_day() {
        let options: PaintingSearchOptions =
            serde_json::from_str(r#"{"createdDate": 1675206000000}"#).unwrap();
        assert_eq!(
            options.created_date,
            Some(CreatedDateFilter::Day(1675206000000))
        );
    }

    #[test]
    fn test_created_date_deserializes_object_as_range() {
        let options: PaintingSearchOptions =
            serde_json::from_str(r#"{"createdDate": {"min": 100, "max": 200}}"#).unwrap();
        assert_eq!(
            options.created_date,
            Some(CreatedDateFilter::Range(RangeOptions {
                min: Some(100),
                max: Some(200),
            }))
        );
    }

    #[test]
    fn test_options_deserialize_from_camel_case() {
        let options: PaintingSearchOptions =
            serde_json::from_str(r#"{"isSold": false, "contentDescription": "storm at sea"}"#)
                .unwrap();
        assert_eq!(options.is_sold, Some(false));
        assert_eq!(
            options.content_description.as_deref(),
            Some("storm at sea")
        );
        assert!(options.name.is_none());
    }
}
