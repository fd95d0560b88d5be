//! Table definitions for the blog catalog.

use super::{Column, TableSchema};

pub const USER: &str = "user";
pub const TIMELINE: &str = "timeline";
pub const TAG: &str = "tag";
pub const CATEGORY: &str = "category";
pub const ARTICLE: &str = "article";
pub const ARTICLE_TAG: &str = "article_tag";
pub const ARTICLE_CATEGORY: &str = "article_category";
pub const ARTICLE_TIMELINE: &str = "article_timeline";
pub const USER_ARTICLE: &str = "user_article";

// =============================================================================
// Entity tables
// =============================================================================

pub static USER_TABLE: TableSchema = TableSchema {
    name: USER,
    columns: &[
        Column::increments("id"),
        Column::string("username"),
        Column::integer("created_at"),
        Column::string("email"),
        Column::string("phone"),
        Column::string("password"),
        Column::string("slogan"),
        Column::string("avatar"),
        Column::string("address"),
        Column::string("concat"),
    ],
};

pub static TIMELINE_TABLE: TableSchema = TableSchema {
    name: TIMELINE,
    columns: &[Column::increments("id"), Column::string("line").unique()],
};

pub static TAG_TABLE: TableSchema = TableSchema {
    name: TAG,
    columns: &[
        Column::increments("id"),
        Column::string("name").unique(),
        Column::string("color"),
        Column::string("back_color"),
    ],
};

pub static CATEGORY_TABLE: TableSchema = TableSchema {
    name: CATEGORY,
    columns: &[Column::increments("id"), Column::string("type").unique()],
};

pub static ARTICLE_TABLE: TableSchema = TableSchema {
    name: ARTICLE,
    columns: &[
        Column::increments("id"),
        Column::string("title").unique().not_null(),
        Column::text("content"),
        Column::text("resource"),
        Column::text("excerpt"),
        Column::integer("created_at"),
        Column::integer("updated_at"),
        Column::integer("status").not_null(),
    ],
};

// =============================================================================
// Join tables (many-to-many edges)
// =============================================================================

pub static ARTICLE_TAG_TABLE: TableSchema = TableSchema {
    name: ARTICLE_TAG,
    columns: &[
        Column::increments("id"),
        Column::integer("article_id").not_null().references(ARTICLE, "id"),
        Column::integer("tag_id").not_null().references(TAG, "id"),
    ],
};

pub static ARTICLE_CATEGORY_TABLE: TableSchema = TableSchema {
    name: ARTICLE_CATEGORY,
    columns: &[
        Column::increments("id"),
        Column::integer("article_id").not_null().references(ARTICLE, "id"),
        Column::integer("category_id").not_null().references(CATEGORY, "id"),
    ],
};

pub static ARTICLE_TIMELINE_TABLE: TableSchema = TableSchema {
    name: ARTICLE_TIMELINE,
    columns: &[
        Column::increments("id"),
        Column::integer("timeline_id").not_null().references(TIMELINE, "id"),
        Column::integer("article_id").not_null().references(ARTICLE, "id"),
    ],
};

pub static USER_ARTICLE_TABLE: TableSchema = TableSchema {
    name: USER_ARTICLE,
    columns: &[
        Column::increments("id"),
        Column::integer("article_id").not_null().references(ARTICLE, "id"),
        Column::integer("user_id").not_null().references(USER, "id"),
    ],
};

/// All blog tables, entity tables first.
pub static ALL_TABLES: &[&TableSchema] = &[
    &USER_TABLE,
    &TIMELINE_TABLE,
    &TAG_TABLE,
    &CATEGORY_TABLE,
    &ARTICLE_TABLE,
    &ARTICLE_TAG_TABLE,
    &ARTICLE_CATEGORY_TABLE,
    &ARTICLE_TIMELINE_TABLE,
    &USER_ARTICLE_TABLE,
];

/// Join tables; each holds exactly two foreign keys.
pub static JOIN_TABLES: &[&TableSchema] = &[
    &ARTICLE_TAG_TABLE,
    &ARTICLE_CATEGORY_TABLE,
    &ARTICLE_TIMELINE_TABLE,
    &USER_ARTICLE_TABLE,
];
