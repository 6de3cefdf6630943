//! Property tests: case and surrounding whitespace never change a lookup.

use std::path::PathBuf;
use std::sync::OnceLock;

use cog_codes::{CogConfig, CogContext};
use proptest::prelude::*;

fn shipped() -> &'static CogContext {
    static CONTEXT: OnceLock<CogContext> = OnceLock::new();
    CONTEXT.get_or_init(|| {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        CogContext::new(CogConfig::from_dir(dir))
    })
}

/// Re-case each character by the mask and pad with whitespace.
fn disguise(name: &str, mask: &[bool], left: &str, right: &str) -> String {
    let body: String = name
        .chars()
        .zip(mask.iter().cycle())
        .map(|(c, &upper)| {
            if upper {
                c.to_uppercase().collect::<String>()
            } else {
                c.to_lowercase().collect::<String>()
            }
        })
        .collect();
    format!("{left}{body}{right}")
}

fn padding() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", " ", "  ", "\t", " \n"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn departement_lookup_ignores_case_and_padding(
        index in 0usize..101,
        mask in prop::collection::vec(any::<bool>(), 1..8),
        left in padding(),
        right in padding(),
    ) {
        let cog = shipped();
        let entry = &cog.list_departements().unwrap()[index];
        let input = disguise(&entry.name, &mask, &left, &right);
        prop_assert_eq!(cog.departement_code(&input).unwrap(), Some(entry.code.as_str()));
    }

    #[test]
    fn commune_lookup_ignores_case_and_padding(
        mask in prop::collection::vec(any::<bool>(), 1..8),
        left in padding(),
        right in padding(),
    ) {
        let cog = shipped();
        let input = disguise("Saint-Martin-d'Hères", &mask, &left, &right);
        prop_assert_eq!(cog.commune_code(&input, None).unwrap().code(), Some("38421"));
    }
}
