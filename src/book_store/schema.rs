//! SQLite schema for the normalized books database.
//!
//! Thirteen tables: the slimmed `books` table, five facet dimensions with
//! their bridge tables, and two one-to-one detail tables. Bridges and
//! details carry real foreign keys, so `books.book_id` is declared UNIQUE
//! (rows whose source id failed to parse keep a NULL id, which SQLite
//! permits under both UNIQUE and the foreign keys).

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, ForeignKeyOnChange, Schema, SqlType, Table};

const BOOK_ID_FK: ForeignKey = ForeignKey {
    foreign_table: "books",
    foreign_column: "book_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const AUTHOR_FK: ForeignKey = ForeignKey {
    foreign_table: "authors",
    foreign_column: "author_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const AWARD_FK: ForeignKey = ForeignKey {
    foreign_table: "awards",
    foreign_column: "award_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const CHARACTER_FK: ForeignKey = ForeignKey {
    foreign_table: "characters",
    foreign_column: "character_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const GENRE_FK: ForeignKey = ForeignKey {
    foreign_table: "genres",
    foreign_column: "genre_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const SETTING_FK: ForeignKey = ForeignKey {
    foreign_table: "settings",
    foreign_column: "setting_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const BOOKS_TABLE: Table = Table {
    name: "books",
    columns: &[
        sqlite_column!("idx", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("book_id", &SqlType::Integer, is_unique = true),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!("series", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("language", &SqlType::Text),
        sqlite_column!("isbn", &SqlType::Text),
        sqlite_column!("book_format", &SqlType::Text),
        sqlite_column!("edition", &SqlType::Text),
        sqlite_column!("pages", &SqlType::Integer),
        sqlite_column!("cover_img", &SqlType::Text),
        sqlite_column!("price", &SqlType::Real),
    ],
    indices: &[("idx_books_book_id", "book_id")],
};

const AUTHORS_TABLE: Table = Table {
    name: "authors",
    columns: &[
        sqlite_column!("author_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("author", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const AUTHORS_BOOKS_BRIDGE_TABLE: Table = Table {
    name: "authors_books_bridge",
    columns: &[
        sqlite_column!("idx", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("book_id", &SqlType::Integer, foreign_key = Some(&BOOK_ID_FK)),
        sqlite_column!(
            "author_id",
            &SqlType::Integer,
            foreign_key = Some(&AUTHOR_FK)
        ),
    ],
    indices: &[
        ("idx_authors_books_book", "book_id"),
        ("idx_authors_books_author", "author_id"),
    ],
};

const AWARDS_TABLE: Table = Table {
    name: "awards",
    columns: &[
        sqlite_column!("award_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("award", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const AWARDS_BOOKS_BRIDGE_TABLE: Table = Table {
    name: "awards_books_bridge",
    columns: &[
        sqlite_column!("idx", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("book_id", &SqlType::Integer, foreign_key = Some(&BOOK_ID_FK)),
        sqlite_column!("award_id", &SqlType::Integer, foreign_key = Some(&AWARD_FK)),
    ],
    indices: &[
        ("idx_awards_books_book", "book_id"),
        ("idx_awards_books_award", "award_id"),
    ],
};

const CHARACTERS_TABLE: Table = Table {
    name: "characters",
    columns: &[
        sqlite_column!("character_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("character", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const CHARACTERS_BOOKS_BRIDGE_TABLE: Table = Table {
    name: "characters_books_bridge",
    columns: &[
        sqlite_column!("idx", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("book_id", &SqlType::Integer, foreign_key = Some(&BOOK_ID_FK)),
        sqlite_column!(
            "character_id",
            &SqlType::Integer,
            foreign_key = Some(&CHARACTER_FK)
        ),
    ],
    indices: &[
        ("idx_characters_books_book", "book_id"),
        ("idx_characters_books_character", "character_id"),
    ],
};

const GENRES_TABLE: Table = Table {
    name: "genres",
    columns: &[
        sqlite_column!("genre_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("genre", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const GENRES_BOOKS_BRIDGE_TABLE: Table = Table {
    name: "genres_books_bridge",
    columns: &[
        sqlite_column!("idx", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("book_id", &SqlType::Integer, foreign_key = Some(&BOOK_ID_FK)),
        sqlite_column!("genre_id", &SqlType::Integer, foreign_key = Some(&GENRE_FK)),
    ],
    indices: &[
        ("idx_genres_books_book", "book_id"),
        ("idx_genres_books_genre", "genre_id"),
    ],
};

const SETTINGS_TABLE: Table = Table {
    name: "settings",
    columns: &[
        sqlite_column!("setting_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("setting", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const SETTINGS_BOOKS_BRIDGE_TABLE: Table = Table {
    name: "settings_books_bridge",
    columns: &[
        sqlite_column!("idx", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("book_id", &SqlType::Integer, foreign_key = Some(&BOOK_ID_FK)),
        sqlite_column!(
            "setting_id",
            &SqlType::Integer,
            foreign_key = Some(&SETTING_FK)
        ),
    ],
    indices: &[
        ("idx_settings_books_book", "book_id"),
        ("idx_settings_books_setting", "setting_id"),
    ],
};

const PUBLICATION_INFO_TABLE: Table = Table {
    name: "publication_info",
    columns: &[
        sqlite_column!("idx", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("book_id", &SqlType::Integer, foreign_key = Some(&BOOK_ID_FK)),
        sqlite_column!("publisher", &SqlType::Text),
        sqlite_column!("publish_date", &SqlType::Text),
        sqlite_column!("first_publish_date", &SqlType::Text),
    ],
    indices: &[("idx_publication_info_book", "book_id")],
};

const RATINGS_AND_BBE_SCORES_TABLE: Table = Table {
    name: "ratings_and_bbe_scores",
    columns: &[
        sqlite_column!("idx", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("book_id", &SqlType::Integer, foreign_key = Some(&BOOK_ID_FK)),
        sqlite_column!("rating", &SqlType::Real),
        sqlite_column!("num_ratings", &SqlType::Integer),
        sqlite_column!("five_stars", &SqlType::Integer),
        sqlite_column!("four_stars", &SqlType::Integer),
        sqlite_column!("three_stars", &SqlType::Integer),
        sqlite_column!("two_stars", &SqlType::Integer),
        sqlite_column!("one_star", &SqlType::Integer),
        sqlite_column!("liked_percent", &SqlType::Real),
        sqlite_column!("bbe_score", &SqlType::Real),
        sqlite_column!("bbe_votes", &SqlType::Integer),
    ],
    indices: &[("idx_ratings_book", "book_id")],
};

/// The complete books schema. Dimension tables precede their bridges and
/// `books` precedes everything that references it, so creating the tables
/// in declaration order never trips foreign key resolution.
pub const BOOKS_SCHEMA: Schema = Schema {
    tables: &[
        BOOKS_TABLE,
        AUTHORS_TABLE,
        AUTHORS_BOOKS_BRIDGE_TABLE,
        AWARDS_TABLE,
        AWARDS_BOOKS_BRIDGE_TABLE,
        CHARACTERS_TABLE,
        CHARACTERS_BOOKS_BRIDGE_TABLE,
        GENRES_TABLE,
        GENRES_BOOKS_BRIDGE_TABLE,
        SETTINGS_TABLE,
        SETTINGS_BOOKS_BRIDGE_TABLE,
        PUBLICATION_INFO_TABLE,
        RATINGS_AND_BBE_SCORES_TABLE,
    ],
};
