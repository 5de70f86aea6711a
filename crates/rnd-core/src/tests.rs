//! Unit tests for rnd-core.

#[cfg(test)]
mod reader_tests {
    use std::io::Cursor;

    use crate::reader::{fields, is_comment, LineReader};

    #[test]
    fn counts_lines_from_one() {
        let mut r = LineReader::new(Cursor::new(b"a\nb\nc\n" as &[u8]));
        assert_eq!(r.lineno(), 0);
        let l1 = r.next_line().unwrap().unwrap();
        assert_eq!(l1.number, 1);
        assert_eq!(l1.text, "a");
        let l2 = r.next_line().unwrap().unwrap();
        assert_eq!(l2.number, 2);
        assert_eq!(r.lineno(), 2);
    }

    #[test]
    fn strips_crlf() {
        let mut r = LineReader::new(Cursor::new(b"hello\r\n" as &[u8]));
        let l = r.next_line().unwrap().unwrap();
        assert_eq!(l.text, "hello");
    }

    #[test]
    fn none_at_eof() {
        let mut r = LineReader::new(Cursor::new(b"" as &[u8]));
        assert!(r.next_line().unwrap().is_none());
    }

    #[test]
    fn two_readers_are_independent() {
        let mut a = LineReader::new(Cursor::new(b"x\ny\n" as &[u8]));
        let mut b = LineReader::new(Cursor::new(b"p\n" as &[u8]));
        a.next_line().unwrap();
        assert_eq!(b.lineno(), 0);
        b.next_line().unwrap();
        assert_eq!(a.lineno(), 1);
        assert_eq!(b.lineno(), 1);
    }

    #[test]
    fn fields_split_on_whitespace_and_skip_empties() {
        let toks: Vec<_> = fields("segment\t1   extra\t\tfield").collect();
        assert_eq!(toks, ["segment", "1", "extra", "field"]);
    }

    #[test]
    fn comment_prefix_detected() {
        assert!(is_comment("/*"));
        assert!(is_comment("/*comment"));
        assert!(!is_comment("segment"));
        assert!(!is_comment(""));
    }
}

#[cfg(test)]
mod boundary_tests {
    use crate::boundary::Boundary;

    #[test]
    fn round_trips_keywords() {
        for b in [
            Boundary::DoubleYellow,
            Boundary::SolidWhite,
            Boundary::BrokenWhite,
            Boundary::SolidYellow,
        ] {
            let kw = b.keyword().unwrap();
            assert_eq!(Boundary::from_keyword(kw), Some(b));
        }
    }

    #[test]
    fn unspecified_has_no_keyword() {
        assert_eq!(Boundary::Unspecified.keyword(), None);
        assert_eq!(Boundary::default(), Boundary::Unspecified);
    }

    #[test]
    fn unknown_keyword_rejected() {
        assert_eq!(Boundary::from_keyword("yellow"), None);
    }
}

#[cfg(test)]
mod geo_tests {
    use crate::geo::GeoPoint;

    #[test]
    fn display_uses_six_decimals() {
        let p = GeoPoint::new(37.0, -122.000001);
        assert_eq!(format!("{p}"), "37.000000\t-122.000001");
    }
}
