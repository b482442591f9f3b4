use shared_types::Header;

/// Value of the first header named exactly `name`
pub fn find_header<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|header| header.name == name)
        .map(|header| header.value.as_str())
}

/// Value of the first header named exactly `name`, or `default` when there is none
pub fn get_header<'a>(headers: &'a [Header], name: &str, default: &'a str) -> &'a str {
    find_header(headers, name).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_headers() -> Vec<Header> {
        vec![
            Header::new("Received", "by mx.example.net"),
            Header::new("Subject", "Application submitted"),
            Header::new("Received", "by relay.example.net"),
        ]
    }

    #[test]
    fn test_first_match_wins() {
        let headers = sample_headers();
        assert_eq!(get_header(&headers, "Received", ""), "by mx.example.net");
    }

    #[test]
    fn test_default_when_missing() {
        let headers = sample_headers();
        assert_eq!(get_header(&headers, "Date", "No Date"), "No Date");
        assert_eq!(find_header(&headers, "From"), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let headers = sample_headers();
        assert_eq!(find_header(&headers, "subject"), None);
        assert_eq!(
            find_header(&headers, "Subject"),
            Some("Application submitted")
        );
    }
}
