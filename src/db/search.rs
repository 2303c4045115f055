use super::{Db, serialize_vector};
use rusqlite::{Result, params};

/// A retrieved chunk with its definition metadata and similarity score.
#[derive(Debug)]
pub struct SearchResult {
    pub file_path: String,
    pub name: String,
    pub kind: String,
    pub language: String,
    pub content: String,
    pub position: usize,
    pub similarity: f64,
}

impl Db {
    /// Return the `top_k` chunks most similar to the query vector, ordered
    /// by cosine distance.
    pub fn search(&self, query_vector: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT
                d.file_path,
                d.name,
                d.kind,
                d.language,
                c.content,
                c.position,
                vec_distance_cosine(v.embedding, ?) as distance
            FROM vec_chunks v
            JOIN chunks c ON v.rowid = c.id
            JOIN documents d ON c.document_id = d.id
            ORDER BY distance ASC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(
            params![serialize_vector(query_vector), top_k as i64],
            |row| {
                let distance: f64 = row.get(6)?;
                Ok(SearchResult {
                    file_path: row.get(0)?,
                    name: row.get(1)?,
                    kind: row.get(2)?,
                    language: row.get(3)?,
                    content: row.get(4)?,
                    position: row.get::<_, i64>(5)? as usize,
                    similarity: 1.0 - (distance / 2.0),
                })
            },
        )?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }
}
