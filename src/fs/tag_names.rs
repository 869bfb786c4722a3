//! File-name encoding for tags
//!
//! Tags are free-form, so the checkpoint store percent-encodes them before
//! using them as file names. Everywhere else a tag is used exactly as typed.

use std::borrow::Cow;

const CHECKPOINT_FILE_PREFIX: &str = "checkpoint-";
const CHECKPOINT_FILE_SUFFIX: &str = ".json";

pub fn encode_tag(tag: &str) -> String {
    urlencoding::encode(tag).into_owned()
}

pub fn checkpoint_file_name(tag: &str) -> String {
    format!(
        "{CHECKPOINT_FILE_PREFIX}{}{CHECKPOINT_FILE_SUFFIX}",
        encode_tag(tag)
    )
}

/// Recover the tag from a checkpoint file name, if it is one.
pub fn tag_from_file_name(file_name: &str) -> Option<String> {
    let encoded = file_name
        .strip_prefix(CHECKPOINT_FILE_PREFIX)?
        .strip_suffix(CHECKPOINT_FILE_SUFFIX)?;
    if encoded.is_empty() {
        return None;
    }
    urlencoding::decode(encoded).ok().map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_escapes_path_separators() {
        assert_eq!(
            checkpoint_file_name("feature/login fix"),
            "checkpoint-feature%2Flogin%20fix.json"
        );
    }

    #[test]
    fn test_tag_from_file_name() {
        let name = checkpoint_file_name("a/b c");
        assert_eq!(tag_from_file_name(&name).as_deref(), Some("a/b c"));
        assert_eq!(tag_from_file_name("notes.json"), None);
        assert_eq!(tag_from_file_name("checkpoint-.json"), None);
    }

    #[test]
    fn test_percent_in_tag_survives_file_name_round_trip() {
        let name = checkpoint_file_name("50%25off");
        assert_eq!(name, "checkpoint-50%2525off.json");
        assert_eq!(tag_from_file_name(&name).as_deref(), Some("50%25off"));
    }
}
