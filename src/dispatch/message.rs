//! Reflection validation and deep-link construction

use crate::error::{ValidationError, MIN_REFLECTION_CHARS};

/// Check a reflection is long enough and return it trimmed
pub fn validate(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    let length = trimmed.chars().count();
    if length < MIN_REFLECTION_CHARS {
        return Err(ValidationError::ReflectionTooShort {
            length,
            minimum: MIN_REFLECTION_CHARS,
        });
    }
    Ok(trimmed)
}

/// The message handed to the messaging app, before escaping
pub fn build_external_message(duration_minutes: u32, reflection: &str) -> String {
    format!(
        "[#PrayerCloud Reflection | {duration_minutes} Min]\n\n\
         VISION & EXECUTION:\n\"{reflection}\"\n\n\
         --- \n\
         *Sent via The Ark Network Prayer Cloud.* Please share this in the main WhatsApp Group."
    )
}

/// `<base>/<recipient>?text=<escaped message>`
pub fn build_deep_link(base: &str, recipient: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        base.trim_end_matches('/'),
        recipient,
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_short_text() {
        assert!(validate("short").is_err());
        // Whitespace does not count towards the minimum
        assert!(validate(&format!("   {}   ", "x".repeat(19))).is_err());
    }

    #[test]
    fn validate_accepts_twenty_characters() {
        let text = "x".repeat(20);
        assert_eq!(validate(&text).unwrap(), text);
        assert_eq!(validate(&format!("\n{text}\n")).unwrap(), text);
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        // 10 characters, 20 bytes
        assert!(validate(&"é".repeat(10)).is_err());
    }

    #[test]
    fn message_embeds_duration_and_reflection() {
        let message = build_external_message(20, "I will build the thing.");
        assert!(message.starts_with("[#PrayerCloud Reflection | 20 Min]\n\n"));
        assert!(message.contains("VISION & EXECUTION:\n\"I will build the thing.\"\n\n--- \n"));
        assert!(message.ends_with("Please share this in the main WhatsApp Group."));
    }

    #[test]
    fn deep_link_escapes_the_message() {
        let link = build_deep_link("https://wa.me/", "15550100", "a b&c\n\"d\"");
        assert_eq!(link, "https://wa.me/15550100?text=a%20b%26c%0A%22d%22");
    }
}
