//! Masking of personal data for log output

/// Mask an email address, keeping the first character of the local part
/// and the full domain: `alice@example.com` becomes `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None if email.is_empty() => String::from("***"),
        None => {
            let first: String = email.chars().take(1).collect();
            format!("{}***", first)
        }
    }
}
