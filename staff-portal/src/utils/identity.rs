//! Login identity derivation from human-entered names.
//!
//! A handle keeps only ASCII letters and digits. Accented and non-Latin
//! characters are dropped rather than transliterated, so some legitimate
//! names produce no handle at all; callers must treat `None` as "cannot
//! register with these names".

/// Domain of every derived email address.
pub const EMAIL_DOMAIN: &str = "ourcompany.com";

/// Maximum length of each cleaned name.
pub const MAX_HANDLE_LEN: usize = 20;

/// Username and email derived from the same handle pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedIdentity {
    pub username: String,
    pub email: String,
}

/// Trims, lowercases, strips everything outside `[a-z0-9]` and truncates.
///
/// Never fails; an empty result means the name has no usable characters.
pub fn clean_for_handle(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(MAX_HANDLE_LEN)
        .collect()
}

/// `{first initial}.{last}@ourcompany.com`, or `None` when either name
/// cleans down to nothing.
pub fn derive_email(first_name: &str, last_name: &str) -> Option<String> {
    let first = clean_for_handle(first_name);
    let last = clean_for_handle(last_name);

    let initial = first.chars().next()?;
    if last.is_empty() {
        return None;
    }

    Some(format!("{}.{}@{}", initial, last, EMAIL_DOMAIN))
}

/// The derived email together with its local part as the username.
pub fn derive_identity(first_name: &str, last_name: &str) -> Option<DerivedIdentity> {
    let email = derive_email(first_name, last_name)?;
    let username = email.split('@').next()?.to_string();

    Some(DerivedIdentity { username, email })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_handle(s: &str) -> bool {
        s.len() <= MAX_HANDLE_LEN && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    }

    #[test]
    fn test_clean_strips_spaces_and_symbols() {
        assert_eq!(clean_for_handle("  De La Cruz "), "delacruz");
        assert_eq!(clean_for_handle("O'Connor"), "oconnor");
        assert_eq!(clean_for_handle("Jean-Pierre"), "jeanpierre");
        assert_eq!(clean_for_handle("!@#"), "");
        assert_eq!(clean_for_handle(""), "");
        assert_eq!(clean_for_handle("   "), "");
    }

    #[test]
    fn test_clean_drops_non_ascii_letters() {
        assert_eq!(clean_for_handle("José"), "jos");
        assert_eq!(clean_for_handle("García"), "garca");
        assert_eq!(clean_for_handle("李"), "");
        assert_eq!(clean_for_handle("Ørjan"), "rjan");
    }

    #[test]
    fn test_clean_truncates_after_stripping() {
        let long = "Abc-Def Ghi Jkl Mno Pqr Stu Vwx";
        let cleaned = clean_for_handle(long);
        assert_eq!(cleaned, "abcdefghijklmnopqrst");
        assert_eq!(cleaned.len(), MAX_HANDLE_LEN);
    }

    #[test]
    fn test_clean_output_shape_and_idempotence() {
        let samples = [
            "John",
            "  MiXeD 123 ",
            "émile zola",
            "\u{130}stanbul",
            "tab\tand\nnewline",
            "0123456789012345678901234",
            "🙂 smile",
            "",
        ];
        for s in samples {
            let once = clean_for_handle(s);
            assert!(is_handle(&once), "{:?} -> {:?}", s, once);
            assert_eq!(clean_for_handle(&once), once);
        }
    }

    #[test]
    fn test_derive_email_happy_paths() {
        assert_eq!(
            derive_email("John", "Smith").as_deref(),
            Some("j.smith@ourcompany.com")
        );
        assert_eq!(
            derive_email("BJ John", "De La Cruz").as_deref(),
            Some("b.delacruz@ourcompany.com")
        );
        assert_eq!(
            derive_email("Mary", "O'Connor").as_deref(),
            Some("m.oconnor@ourcompany.com")
        );
        assert_eq!(
            derive_email("123", "456").as_deref(),
            Some("1.456@ourcompany.com")
        );
        assert_eq!(
            derive_email("A B C", "D E F").as_deref(),
            Some("a.def@ourcompany.com")
        );
    }

    #[test]
    fn test_derive_email_uses_cleaned_initial() {
        // the raw first character is a symbol; the initial comes from the cleaned name
        assert_eq!(
            derive_email("'Zed", "Shaw").as_deref(),
            Some("z.shaw@ourcompany.com")
        );
    }

    #[test]
    fn test_derive_email_ascii_only_policy() {
        assert_eq!(
            derive_email("José", "García").as_deref(),
            Some("j.garca@ourcompany.com")
        );
        assert_eq!(derive_email("李", "王"), None);
    }

    #[test]
    fn test_derive_email_rejects_empty_sides() {
        assert_eq!(derive_email("", "Smith"), None);
        assert_eq!(derive_email("John", ""), None);
        assert_eq!(derive_email("!@#", "$%^"), None);
        assert_eq!(derive_email("John", "---"), None);
    }

    #[test]
    fn test_derive_email_is_deterministic() {
        let a = derive_email("Jean-Pierre", "Van Der Berg");
        let b = derive_email("Jean-Pierre", "Van Der Berg");
        assert_eq!(a, b);
        assert_eq!(a.as_deref(), Some("j.vanderberg@ourcompany.com"));
    }

    #[test]
    fn test_derive_identity_shares_handle() {
        let identity = derive_identity("BJ John", "De La Cruz").unwrap();
        assert_eq!(identity.username, "b.delacruz");
        assert_eq!(identity.email, "b.delacruz@ourcompany.com");

        assert_eq!(derive_identity("李", "Smith"), None);
    }
}
