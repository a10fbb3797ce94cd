use super::*;

#[test]
fn command_family_of_tokens() {
    assert_eq!(
        TokenKind::HttpUri.command_family(),
        Some(CommandFamily::Http)
    );
    assert_eq!(TokenKind::SslCert.command_family(), Some(CommandFamily::Ssl));
    assert_eq!(TokenKind::LbSelect.command_family(), Some(CommandFamily::Lb));
    assert_eq!(
        TokenKind::IpClientAddr.command_family(),
        Some(CommandFamily::Ip)
    );
    assert_eq!(TokenKind::Pool.command_family(), None);
}

#[test]
fn command_family_of_names() {
    assert_eq!(
        CommandFamily::of_name("HTTP::fallback"),
        Some(CommandFamily::Http)
    );
    assert_eq!(CommandFamily::of_name("LB::prime"), Some(CommandFamily::Lb));
    assert_eq!(CommandFamily::of_name("HTTP::"), None);
    assert_eq!(CommandFamily::of_name("TCP::collect"), None);
}

#[test]
fn words_and_reserved_words() {
    assert!(TokenKind::Ident.is_word());
    assert!(TokenKind::Default.is_word());
    assert!(TokenKind::HttpHeader.is_word());
    assert!(!TokenKind::Number.is_word());
    assert!(TokenKind::If.is_reserved_word());
    assert!(!TokenKind::Pool.is_reserved_word());
}

#[test]
fn plus_word() {
    let plus = Token::dummy(TokenKind::Ident, "+");
    assert!(plus.is_plus_word());
    assert!(!Token::dummy(TokenKind::Ident, "x").is_plus_word());
}

#[test]
fn flags_adjacency() {
    assert!(TokenFlags::empty().is_adjacent());
    assert!(!TokenFlags::SPACE_BEFORE.is_adjacent());
    assert!(TokenFlags::NEWLINE_BEFORE.starts_line());
}

#[test]
fn debug_rendering() {
    let token = Token::new(TokenKind::Set, "set", 4, Span::new(0, 3));
    assert_eq!(format!("{token:?}"), "SET(\"set\") @ line 4");
    assert_eq!(TokenKind::IpClientAddr.to_string(), "IP_CLIENT_ADDR");
}
