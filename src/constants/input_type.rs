/// Text-input type bitmask layout
pub mod input_type {
    // Masks
    pub const TYPE_MASK_CLASS: i32 = 0x0000_000f;      // Low 4 bits: input class
    pub const TYPE_MASK_VARIATION: i32 = 0x0000_0ff0;  // Bits 4-11: variation within the class

    // Classes
    pub const TYPE_NULL: i32 = 0x0;                    // No input
    pub const TYPE_CLASS_TEXT: i32 = 0x1;              // Free text
    pub const TYPE_CLASS_NUMBER: i32 = 0x2;            // Numeric
    pub const TYPE_CLASS_PHONE: i32 = 0x3;             // Phone number
    pub const TYPE_CLASS_DATETIME: i32 = 0x4;          // Date and/or time

    // Text variations
    pub const TEXT_VARIATION_URI: i32 = 0x10;
    pub const TEXT_VARIATION_EMAIL_ADDRESS: i32 = 0x20;
    pub const TEXT_VARIATION_EMAIL_SUBJECT: i32 = 0x30;
    pub const TEXT_VARIATION_SHORT_MESSAGE: i32 = 0x40;
    pub const TEXT_VARIATION_LONG_MESSAGE: i32 = 0x50;
    pub const TEXT_VARIATION_PERSON_NAME: i32 = 0x60;
    pub const TEXT_VARIATION_POSTAL_ADDRESS: i32 = 0x70;
    pub const TEXT_VARIATION_PASSWORD: i32 = 0x80;
    pub const TEXT_VARIATION_VISIBLE_PASSWORD: i32 = 0x90;
    pub const TEXT_VARIATION_WEB_EDIT_TEXT: i32 = 0xa0;
    pub const TEXT_VARIATION_FILTER: i32 = 0xb0;
    pub const TEXT_VARIATION_PHONETIC: i32 = 0xc0;
    pub const TEXT_VARIATION_WEB_EMAIL_ADDRESS: i32 = 0xd0;
    pub const TEXT_VARIATION_WEB_PASSWORD: i32 = 0xe0;

    // Number variations
    pub const NUMBER_VARIATION_PASSWORD: i32 = 0x10;

    // Date/time variations
    pub const DATETIME_VARIATION_DATE: i32 = 0x10;
    pub const DATETIME_VARIATION_TIME: i32 = 0x20;
}
