//! Email Agent
//!
//! Formats a summary as a ready-to-send letter. Pure string work, no
//! external calls: a subject line derived from the opening of the text,
//! a fixed salutation, the content verbatim, and a fixed sign-off.

pub struct EmailAgent;

impl EmailAgent {
    /// Subject line: the text before the first period, capped at 60 characters.
    pub fn derive_subject(content: &str) -> String {
        let first_line: String = content
            .split('.')
            .next()
            .unwrap_or("")
            .chars()
            .take(60)
            .collect();
        format!("Subject: Overview on {}", first_line)
    }

    /// Render the full letter. The content is embedded verbatim, however
    /// long or malformed.
    pub fn format(content: &str) -> String {
        let subject = Self::derive_subject(content);

        format!(
            "\n{subject}\n\nDear Sir/Madam,\n\n{content}\n\nRegards,\nMulti-Agent Research System\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_contains_fixed_parts() {
        let email = EmailAgent::format("Quantum computing basics. More detail follows.");
        assert!(email.contains("Subject: Overview on"));
        assert!(email.contains("Dear Sir/Madam,"));
        assert!(email.contains("Multi-Agent Research System"));
    }

    #[test]
    fn test_subject_stops_at_first_period() {
        let subject = EmailAgent::derive_subject("Short intro. The rest is ignored.");
        assert_eq!(subject, "Subject: Overview on Short intro");
    }

    #[test]
    fn test_subject_caps_at_sixty_characters() {
        let long = "a".repeat(100);
        let subject = EmailAgent::derive_subject(&long);
        assert_eq!(subject, format!("Subject: Overview on {}", "a".repeat(60)));
    }

    #[test]
    fn test_subject_without_period_uses_whole_text() {
        let subject = EmailAgent::derive_subject("no period here");
        assert_eq!(subject, "Subject: Overview on no period here");
    }

    #[test]
    fn test_content_embedded_verbatim() {
        let content = "First section.\n\nSecond section with <tags> & symbols.";
        let email = EmailAgent::format(content);
        assert!(email.contains(content));
    }

    #[test]
    fn test_empty_content_still_renders_template() {
        let email = EmailAgent::format("");
        assert!(email.contains("Subject: Overview on \n"));
        assert!(email.contains("Dear Sir/Madam,"));
        assert!(email.ends_with("Regards,\nMulti-Agent Research System\n"));
    }
}
