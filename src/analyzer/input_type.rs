//! Text-input type decoding
//!
//! An input-type mask carries an input class in its low four bits and a
//! variation within that class in bits 4-11. Everything else (flags) is
//! ignored.

use crate::constants::input_type::input_type::*;

/// Semantic category of an input-type mask.
///
/// Returns the empty string for `TYPE_NULL` and for classes without a
/// category.
pub fn decode(mask: i32) -> &'static str {
    let variation = mask & TYPE_MASK_VARIATION;
    match mask & TYPE_MASK_CLASS {
        TYPE_CLASS_TEXT => decode_text(variation),
        TYPE_CLASS_NUMBER => match variation {
            NUMBER_VARIATION_PASSWORD => "numeric_password",
            _ => "number",
        },
        TYPE_CLASS_PHONE => "phone",
        TYPE_CLASS_DATETIME => match variation {
            DATETIME_VARIATION_DATE => "date",
            DATETIME_VARIATION_TIME => "time",
            _ => "date_time",
        },
        _ => "",
    }
}

fn decode_text(variation: i32) -> &'static str {
    match variation {
        TEXT_VARIATION_URI => "uri",
        TEXT_VARIATION_EMAIL_ADDRESS | TEXT_VARIATION_WEB_EMAIL_ADDRESS => "email",
        TEXT_VARIATION_EMAIL_SUBJECT => "email_subject",
        TEXT_VARIATION_SHORT_MESSAGE => "short_message",
        TEXT_VARIATION_LONG_MESSAGE => "long_message",
        TEXT_VARIATION_PERSON_NAME => "person_name",
        TEXT_VARIATION_POSTAL_ADDRESS => "address",
        TEXT_VARIATION_PASSWORD | TEXT_VARIATION_WEB_PASSWORD => "password",
        TEXT_VARIATION_VISIBLE_PASSWORD => "visible_password",
        TEXT_VARIATION_WEB_EDIT_TEXT => "web_edit_text",
        TEXT_VARIATION_FILTER => "text_filter",
        TEXT_VARIATION_PHONETIC => "text_phonetic",
        _ => "text",
    }
}

/// Decode every mask, keeping duplicates
pub fn decode_all<'a>(masks: impl IntoIterator<Item = &'a i32>) -> Vec<&'static str> {
    masks.into_iter().map(|&mask| decode(mask)).collect()
}
