use lossless_ini::{
    from_slice, parse, parse_with_options, to_vec, Error, ErrorCategory, IniFile, Line, Node,
    ParseOptions, SyntaxErrorKind, ValueState,
};
use std::io::{self, Read};

fn only_line(file: &IniFile) -> &Line {
    assert_eq!(file.len(), 1, "expected exactly one line");
    file.head().unwrap()
}

fn syntax_error(input: &[u8]) -> (SyntaxErrorKind, u8, usize, usize) {
    match from_slice(input) {
        Err(Error::Syntax {
            kind,
            byte,
            line,
            col,
        }) => (kind, byte, line, col),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

// Empty lines

#[test]
fn test_empty_file() {
    let file = from_slice(b"").unwrap();
    assert!(file.is_empty());
    assert!(file.head().is_none());
    assert!(file.tail().is_none());
    assert!(!file.trailing_newline());
}

#[test]
fn test_bare_newline() {
    let file = from_slice(b"\n").unwrap();
    let line = only_line(&file).as_empty().unwrap();
    assert!(line.padding.is_empty());
    assert!(line.comment.is_none());
    assert!(file.trailing_newline());
}

#[test]
fn test_whitespace_only_line() {
    let file = from_slice(b" \t\r\n").unwrap();
    let line = only_line(&file).as_empty().unwrap();
    assert_eq!(line.padding.content(), b" \t\r");
    assert!(line.comment.is_none());
}

#[test]
fn test_comment_line() {
    let file = from_slice(b"# hello\n").unwrap();
    let line = only_line(&file).as_empty().unwrap();
    assert!(line.padding.is_empty());
    let comment = line.comment.as_ref().unwrap();
    assert_eq!(comment.symbol(), b'#');
    assert_eq!(comment.content(), b" hello");
}

#[test]
fn test_semicolon_comment_with_padding() {
    let file = from_slice(b"\t ;x = [y] \"z\n").unwrap();
    let line = only_line(&file).as_empty().unwrap();
    assert_eq!(line.padding.content(), b"\t ");
    let comment = line.comment.as_ref().unwrap();
    assert_eq!(comment.symbol(), b';');
    assert_eq!(comment.content(), b"x = [y] \"z");
}

#[test]
fn test_commented_out_section() {
    let file = from_slice(b"#[foo]\n").unwrap();
    let line = only_line(&file);
    assert!(line.as_section_header().is_none());
    assert_eq!(line.comment().unwrap().content(), b"[foo]");
}

#[test]
fn test_comment_accepts_any_byte() {
    let file = from_slice(b"#\0\x01\xff\n").unwrap();
    assert_eq!(only_line(&file).comment().unwrap().content(), b"\0\x01\xff");
}

#[test]
fn test_consecutive_newlines() {
    let file = from_slice(b"\n\n\n").unwrap();
    assert_eq!(file.len(), 3);
    assert!(file.iter().all(|line| line.as_empty().is_some()));
}

#[test]
fn test_last_line_without_newline() {
    let file = from_slice(b"a=1\nb=2").unwrap();
    assert_eq!(file.len(), 2);
    assert!(!file.trailing_newline());
    let tail = file.tail().unwrap().as_key_value().unwrap();
    assert_eq!(tail.key.content(), b"b");
}

// Section headers

#[test]
fn test_simple_section() {
    let file = from_slice(b"[foo]\n").unwrap();
    let line = only_line(&file).as_section_header().unwrap();
    assert!(line.padding.is_empty());
    assert_eq!(line.header.content(), b"foo");
    assert!(line.post_pad.as_ref().unwrap().is_empty());
    assert!(line.comment.is_none());
    assert!(only_line(&file).terminated());
}

#[test]
fn test_section_with_padding_and_comment() {
    let file = from_slice(b"  [a b.c]\t ; note\n").unwrap();
    let line = only_line(&file).as_section_header().unwrap();
    assert_eq!(line.padding.content(), b"  ");
    assert_eq!(line.header.content(), b"a b.c");
    assert_eq!(line.post_pad.as_ref().unwrap().content(), b"\t ");
    assert_eq!(line.comment.as_ref().unwrap().content(), b" note");
}

#[test]
fn test_unclosed_section_is_unterminated() {
    let file = from_slice(b"[open\n[closed]\n").unwrap();
    let open = file.get(0).unwrap();
    assert!(!open.terminated());
    assert!(open.as_section_header().unwrap().post_pad.is_none());
    assert!(file.get(1).unwrap().terminated());
    assert!(!file.terminated());
}

#[test]
fn test_section_header_accepts_other_bytes() {
    let file = from_slice(b"[a=\"b[c]\n").unwrap();
    let line = only_line(&file).as_section_header().unwrap();
    assert_eq!(line.header.content(), b"a=\"b[c");
}

#[test]
fn test_comment_in_section_header() {
    let (kind, byte, line, col) = syntax_error(b"[a#b]\n");
    assert_eq!(kind, SyntaxErrorKind::CommentInHeader);
    assert_eq!((byte, line, col), (b'#', 0, 2));
    assert_eq!(kind.category(), ErrorCategory::Header);
}

#[test]
fn test_text_after_section_header() {
    let (kind, byte, line, col) = syntax_error(b"\n[a] b\n");
    assert_eq!(kind, SyntaxErrorKind::CharAfterHeader);
    assert_eq!((byte, line, col), (b'b', 1, 4));
}

// Key/value lines

#[test]
fn test_key_value() {
    let file = from_slice(b"k=v\n").unwrap();
    let line = only_line(&file).as_key_value().unwrap();
    assert_eq!(line.key.content(), b"k");
    assert!(line.post_key_pad.is_none());
    assert_eq!(line.value.as_ref().unwrap().content(), b"v");
    assert!(line.comment.is_none());
    assert!(only_line(&file).terminated());
}

#[test]
fn test_key_value_with_padding() {
    let file = from_slice(b" key \t= some value \n").unwrap();
    let line = only_line(&file).as_key_value().unwrap();
    assert_eq!(line.padding.content(), b" ");
    assert_eq!(line.key.content(), b"key");
    assert_eq!(line.post_key_pad.as_ref().unwrap().content(), b" \t");
    assert_eq!(line.value.as_ref().unwrap().raw(), b" some value ");
}

#[test]
fn test_quoted_value_with_escaped_quote() {
    let file = from_slice(b"k=\"a\\\"b\"\n").unwrap();
    let line = only_line(&file);
    let value = line.as_key_value().unwrap().value.as_ref().unwrap();
    assert_eq!(value.content(), b"a\\\"b");
    assert_eq!(value.raw(), b"\"a\\\"b\"");
    assert!(line.terminated());
}

#[test]
fn test_comment_symbols_inside_quotes() {
    let file = from_slice(b"k = \"a;b#c\" # real\n").unwrap();
    let line = only_line(&file).as_key_value().unwrap();
    assert_eq!(line.value.as_ref().unwrap().content(), b"a;b#c");
    assert_eq!(line.comment.as_ref().unwrap().content(), b" real");
}

#[test]
fn test_unquoted_value_then_comment() {
    let file = from_slice(b"k=v;c\n").unwrap();
    let line = only_line(&file).as_key_value().unwrap();
    assert_eq!(line.value.as_ref().unwrap().raw(), b"v");
    assert_eq!(line.comment.as_ref().unwrap().symbol(), b';');
    assert_eq!(line.comment.as_ref().unwrap().content(), b"c");
}

#[test]
fn test_empty_value_is_terminated() {
    let file = from_slice(b"k=\n").unwrap();
    let line = only_line(&file);
    assert!(line.as_key_value().unwrap().value.as_ref().unwrap().raw().is_empty());
    assert!(line.terminated());
}

#[test]
fn test_key_without_equals_is_unterminated() {
    let file = from_slice(b"lonely\n").unwrap();
    let line = only_line(&file);
    assert!(line.as_key_value().unwrap().value.is_none());
    assert!(!line.terminated());
}

#[test]
fn test_open_quoted_value_is_unterminated() {
    let file = from_slice(b"a=\"open\nb=\"esc\\").unwrap();
    assert!(!file.get(0).unwrap().terminated());
    assert!(!file.get(1).unwrap().terminated());
}

#[test]
fn test_equals_inside_value() {
    let file = from_slice(b"url=a=b\n").unwrap();
    let line = only_line(&file).as_key_value().unwrap();
    assert_eq!(line.key.content(), b"url");
    assert_eq!(line.value.as_ref().unwrap().raw(), b"a=b");
}

#[test]
fn test_carriage_return_is_whitespace() {
    let file = from_slice(b"k=v\r\n").unwrap();
    let line = only_line(&file).as_key_value().unwrap();
    assert_eq!(line.value.as_ref().unwrap().raw(), b"v\r");
    assert_eq!(to_vec(&file), b"k=v\r\n");
}

// Errors

#[test]
fn test_null_in_unquoted_value() {
    let err = from_slice(b"[s]\nkey=ab\0\n").unwrap_err();
    assert_eq!(err.position(), Some((1, 6)));
    assert!(err.to_string().contains("illegal character in value"));
    assert!(err.to_string().contains("\\x00"));
    assert!(matches!(
        err,
        Error::Syntax {
            kind: SyntaxErrorKind::IllegalValueChar,
            byte: 0,
            ..
        }
    ));
}

#[test]
fn test_null_in_quoted_value() {
    let (kind, _, _, col) = syntax_error(b"k=\"a\0\"\n");
    assert_eq!(kind, SyntaxErrorKind::IllegalValueChar);
    assert_eq!(col, 4);
}

#[test]
fn test_text_after_closed_quote() {
    let (kind, byte, line, col) = syntax_error(b"k=\"a\"x\n");
    assert_eq!(kind, SyntaxErrorKind::CharAfterQuotedValue);
    assert_eq!((byte, line, col), (b'x', 0, 5));
}

#[test]
fn test_whitespace_and_comment_after_closed_quote() {
    let file = from_slice(b"k=\"a\"  ;ok\n").unwrap();
    assert!(only_line(&file).terminated());
}

#[test]
fn test_quote_in_unquoted_value() {
    let (kind, _, _, col) = syntax_error(b"k=ab\"c\n");
    assert_eq!(kind, SyntaxErrorKind::IllegalQuote);
    assert_eq!(col, 4);
}

#[test]
fn test_second_quoted_string() {
    let (kind, _, _, _) = syntax_error(b"k=\"a\" \"b\"\n");
    assert_eq!(kind, SyntaxErrorKind::IllegalQuote);
}

#[test]
fn test_invalid_character_for_empty_line() {
    for input in [&b"=v\n"[..], b"]\n", b"\x01\n", b"  \0"] {
        let (kind, _, _, _) = syntax_error(input);
        assert_eq!(kind, SyntaxErrorKind::InvalidEmptyLineChar);
        assert_eq!(kind.category(), ErrorCategory::EmptyLine);
    }
}

#[test]
fn test_invalid_character_in_key() {
    let (kind, byte, _, col) = syntax_error(b"ke]y=v\n");
    assert_eq!(kind, SyntaxErrorKind::InvalidKeyChar);
    assert_eq!((byte, col), (b']', 2));
}

#[test]
fn test_space_inside_key() {
    let (kind, byte, _, col) = syntax_error(b"two words=v\n");
    assert_eq!(kind, SyntaxErrorKind::InvalidKeyPadChar);
    assert_eq!((byte, col), (b'w', 4));
}

#[test]
fn test_error_message_format() {
    let err = from_slice(b"\n\n[a;]").unwrap_err();
    assert_eq!(
        err.to_string(),
        "illegal comment start in bracket ';' (line:2, col:2)"
    );
}

#[test]
fn test_no_partial_file_on_error() {
    let result = from_slice(b"a=1\nb=2\n[c] d\n");
    assert!(result.is_err());
}

// Options

#[test]
fn test_strict_rejects_unterminated() {
    for input in [&b"[open\n"[..], b"k\n", b"k=\"open\n", b"x=1\nk=\"esc\\"] {
        let result = parse_with_options(input, ParseOptions::strict());
        assert!(
            matches!(result, Err(Error::Unterminated { .. })),
            "{:?}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_strict_accepts_terminated() {
    let input: &[u8] = b"; c\n[a]\nk = \"v\"\nempty=\n";
    let file = parse_with_options(input, ParseOptions::strict()).unwrap();
    assert_eq!(to_vec(&file), input);
}

// I/O

struct FailingReader {
    remaining: &'static [u8],
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining.is_empty() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "source went away"));
        }
        let n = buf.len().min(self.remaining.len());
        buf[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining = &self.remaining[n..];
        Ok(n)
    }
}

#[test]
fn test_io_error_is_surfaced() {
    let err = parse(FailingReader {
        remaining: b"k=v\n",
    })
    .unwrap_err();
    match err {
        Error::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_parse_from_buffered_reader() {
    let input = b"[a]\nk=v\n".to_vec();
    let file = parse(io::BufReader::new(io::Cursor::new(input.clone()))).unwrap();
    assert_eq!(to_vec(&file), input);
}

// Long values

const MEGABYTE: usize = 1 << 20;

#[test]
fn test_megabyte_unquoted_value() {
    let mut input = b"k=".to_vec();
    input.resize(2 + MEGABYTE, b'a');
    input.extend_from_slice(b" ; done\n");

    let file = from_slice(&input).unwrap();
    let line = only_line(&file).as_key_value().unwrap();
    let value = line.value.as_ref().unwrap();
    assert_eq!(value.raw().len(), MEGABYTE + 1);
    assert_eq!(value.state(), ValueState::Unquoted);
    assert_eq!(line.comment.as_ref().unwrap().content(), b" done");
    assert_eq!(to_vec(&file), input);
}

#[test]
fn test_megabyte_quoted_value() {
    // Comment symbols and escaped quotes throughout the quoted body
    let mut input = b"k = \"".to_vec();
    while input.len() < MEGABYTE {
        input.extend_from_slice(b"x#;\\\"");
    }
    input.extend_from_slice(b"\" \n");

    let file = from_slice(&input).unwrap();
    let line = only_line(&file).as_key_value().unwrap();
    let value = line.value.as_ref().unwrap();
    assert_eq!(value.state(), ValueState::QuotedTerminated);
    assert!(line.comment.is_none());
    assert!(file.terminated());
    assert_eq!(to_vec(&file), input);

    let err = from_slice(&[&input[..input.len() - 1], b"x"].concat()).unwrap_err();
    assert!(matches!(
        err,
        Error::Syntax {
            kind: SyntaxErrorKind::CharAfterQuotedValue,
            line: 0,
            ..
        }
    ));
}
