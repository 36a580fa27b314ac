//! Recipient name normalization for output filenames.

/// Map a recipient display name to a filesystem-safe token.
///
/// Lowercases, folds the German umlauts and eszett to their ASCII digraphs,
/// then strips commas, periods and spaces. The order of the steps is part of
/// the contract: folding runs on the lowercased string, so `Ü` becomes `ue`.
/// Characters outside this set pass through unchanged.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace('ö', "oe")
        .replace('ä', "ae")
        .replace('ß', "ss")
        .replace('ü', "ue")
        .replace(',', "")
        .replace('.', "")
        .replace(' ', "")
}
