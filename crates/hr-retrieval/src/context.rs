use crate::model::Document;

pub const CONTEXT_HEADER: &str = "参照一次情報（リンク）:";

/// Render selected documents as the reference block handed to the answer generator.
///
/// Input order is kept as-is; numbering starts at 1.
pub fn format_context<'a, I>(documents: I) -> String
where
    I: IntoIterator<Item = &'a Document>,
{
    let lines: Vec<String> = documents
        .into_iter()
        .enumerate()
        .map(|(i, d)| format!("- [{}] {}: {}", i + 1, d.title, d.url))
        .collect();
    format!("{CONTEXT_HEADER}\n{}", lines.join("\n"))
}
