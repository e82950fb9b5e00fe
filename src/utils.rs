pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(
            escape_xml("<fill & \"stroke\">"),
            "&lt;fill &amp; &quot;stroke&quot;&gt;"
        );
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }
}
