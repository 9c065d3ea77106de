//! Search module - query compilation and the index pass-through / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - `query` + `date_range` are pure: filter options in, composite query out,
//!   no I/O and no failure path
//! - `index` is the only place that talks to the search backend and the only
//!   place that knows its query DSL
//! - Call direction: api → index → query (unidirectional) / 调用方向

pub mod date_range;
pub mod index;
pub mod query;

pub use date_range::{created_date_range, DateRange};
pub use index::{IndexError, PaintingsIndex};
pub use query::{
    compile_query, CompositeQuery, CreatedDateFilter, PaintingSearchOptions, QueryClause,
    RangeOptions,
};
