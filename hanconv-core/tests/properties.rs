//! Property tests for segmentation and conversion.

use proptest::prelude::*;

use hanconv_core::unicode::{segment, unit_count};
use hanconv_core::{compile_exclusion, Converter, Table};

proptest! {
    #[test]
    fn units_concatenate_to_the_input(text in "\\PC*") {
        prop_assert_eq!(segment(&text).concat(), text);
    }

    #[test]
    fn units_are_never_empty(text in "\\PC*") {
        prop_assert!(segment(&text).iter().all(|unit| !unit.is_empty()));
    }

    #[test]
    fn unit_count_matches_segmentation(text in "\\PC*") {
        prop_assert_eq!(unit_count(&text), segment(&text).len());
    }

    #[test]
    fn an_empty_dictionary_converts_to_identity(text in "\\PC*") {
        let converter = Converter::new(Table::new());
        prop_assert_eq!(converter.convert_text(&text, None), text);
    }

    #[test]
    fn excluding_everything_converts_to_identity(text in "[干姜汤a-z]+") {
        let converter = Converter::new(Table::from_pairs([
            ("干", vec!["乾"]),
            ("姜", vec!["薑"]),
        ]));
        let exclude = compile_exclusion(".+").unwrap();
        prop_assert_eq!(converter.convert_text(&text, Some(&exclude)), text);
    }

    #[test]
    fn single_char_mappings_preserve_length(text in "[干姜汤了a-z ]*") {
        let converter = Converter::new(Table::from_pairs([
            ("干", vec!["乾"]),
            ("姜", vec!["薑"]),
        ]));
        let converted = converter.convert_text(&text, None);
        prop_assert_eq!(converted.chars().count(), text.chars().count());
    }
}
