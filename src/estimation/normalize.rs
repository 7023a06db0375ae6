//! Material name normalization for comparison.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a material name for comparison.
///
/// Applies, in order:
/// 1. Lowercase
/// 2. Unicode NFD decomposition, dropping combining marks (accents)
/// 3. Drop every character that is neither alphanumeric nor whitespace
/// 4. Trim leading/trailing whitespace
///
/// Inner whitespace is kept as is. Normalizing twice gives the same result
/// as normalizing once.
///
/// ```
/// use devis::estimation::normalize_name;
///
/// assert_eq!(normalize_name("  Béton prêt à l'emploi ! "), "beton pret a lemploi");
/// ```
pub fn normalize_name(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases() {
        assert_eq!(normalize_name("PLAQUE DE PLÂTRE BA13"), "plaque de platre ba13");
    }

    #[test]
    fn strips_accents() {
        assert_eq!(normalize_name("Enduit façade"), "enduit facade");
        assert_eq!(normalize_name("Évier céramique"), "evier ceramique");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize_name("Vis 4x40 (boîte de 200)."), "vis 4x40 boite de 200");
        assert_eq!(normalize_name("Tube PER-16"), "tube per16");
    }

    #[test]
    fn trims_but_keeps_inner_spacing() {
        assert_eq!(normalize_name("  laine  de verre\t"), "laine  de verre");
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name(" -- ! "), "");
    }

    #[test]
    fn idempotent() {
        for s in ["Béton prêt à l'emploi", "ÉCHAFAUDAGE  ", "Œuvre Σ", "m²"] {
            let once = normalize_name(s);
            assert_eq!(normalize_name(&once), once);
        }
    }
}
