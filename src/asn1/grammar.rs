//! Table-driven grammar interpreter.
//!
//! A grammar is a fixed slice of [`Element`] descriptors matched greedily,
//! in order, against one cursor scope. There is no backtracking: DER's
//! canonical encoding makes every value unambiguous, so the first tag test
//! decides an element once and for all. Field extraction happens through a
//! single sink closure receiving the element's action and the matched node,
//! keeping the grammars data rather than code.

use {
    super::{Class, Cursor, Header, TlvNode},
    crate::error::{Error, ErrorKind, Result},
    tracing::trace,
};

/// Expected identifier octet shape of one element.
#[derive(Clone, Copy, Debug)]
pub struct TagSpec {
    pub class:       Class,
    pub number:      u32,
    /// Expected constructed bit; `None` accepts either form.
    pub constructed: Option<bool>,
}

impl TagSpec {
    pub const fn universal(number: u32) -> Self {
        Self {
            class: Class::Universal,
            number,
            constructed: None,
        }
    }

    pub const fn context(number: u32) -> Self {
        Self {
            class: Class::Context,
            number,
            constructed: None,
        }
    }

    pub const fn constructed(self) -> Self {
        Self {
            constructed: Some(true),
            ..self
        }
    }

    pub const fn primitive(self) -> Self {
        Self {
            constructed: Some(false),
            ..self
        }
    }

    const fn matches(&self, header: &Header) -> bool {
        matches!(
            (self.class, header.class),
            (Class::Universal, Class::Universal)
                | (Class::Application, Class::Application)
                | (Class::Context, Class::Context)
                | (Class::Private, Class::Private)
        ) && self.number == header.number
            && match self.constructed {
                Some(expected) => expected == header.constructed,
                None => true,
            }
    }
}

/// Which tags an element accepts.
#[derive(Clone, Copy, Debug)]
pub enum Matcher {
    /// Exactly one tag.
    Tag(TagSpec),
    /// CHOICE: the first listed tag that matches wins.
    OneOf(&'static [TagSpec]),
    /// Any node at all (ASN.1 `ANY`).
    Any,
}

impl Matcher {
    fn matches(&self, header: &Header) -> bool {
        match self {
            Self::Tag(spec) => spec.matches(header),
            Self::OneOf(specs) => specs.iter().any(|spec| spec.matches(header)),
            Self::Any => true,
        }
    }
}

/// How many matches an element may produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cardinality {
    Required,
    Optional,
    /// Repeat-match until the tag no longer matches or the scope runs out.
    ZeroOrMore,
}

/// What happens with a matched node's content.
#[derive(Clone, Copy, Debug)]
pub enum Shape<A: 'static> {
    /// The sink sees the whole node; the engine does not look inside.
    Leaf,
    /// Descend and run a sub-grammar over the content octets.
    Nested(&'static [Element<A>]),
}

/// One grammar element: expected tag(s), cardinality, an optional action
/// delivered to the sink on every match, and the element's shape.
#[derive(Clone, Copy, Debug)]
pub struct Element<A: 'static> {
    pub name:        &'static str,
    pub matcher:     Matcher,
    pub cardinality: Cardinality,
    pub action:      Option<A>,
    pub shape:       Shape<A>,
}

/// Matches `elements` against the cursor's scope, feeding every action to
/// `sink`. The scope must be fully described: leftover bytes after the last
/// element are a `GrammarMismatch`.
///
/// The action fires before any descent, so a nested element's sink call
/// observes the complete node span (needed to capture signed regions
/// byte-for-byte).
pub fn run<'a, A: Copy>(
    elements: &[Element<A>],
    cursor: &mut Cursor<'a>,
    sink: &mut dyn FnMut(A, &TlvNode<'a>) -> Result<()>,
) -> Result<()> {
    for element in elements {
        loop {
            let header = match cursor.peek()? {
                Some(header) if element.matcher.matches(&header) => header,
                _ => {
                    // No match: a required element fails the parse, the
                    // rest skip without consuming.
                    if element.cardinality == Cardinality::Required {
                        trace!(element = element.name, "required element missing");
                        return Err(Error::new(ErrorKind::GrammarMismatch, cursor.offset()));
                    }
                    break;
                }
            };
            trace!(
                element = element.name,
                number = header.number,
                len = header.len,
                "matched"
            );

            let node = cursor.next()?;
            if let Some(action) = element.action {
                sink(action, &node)?;
            }
            if let Shape::Nested(inner) = element.shape {
                let mut scope = node.descend()?;
                run(inner, &mut scope, sink)?;
                if scope.remaining() != 0 {
                    return Err(Error::new(ErrorKind::GrammarMismatch, scope.offset()));
                }
            }

            if element.cardinality != Cardinality::ZeroOrMore {
                break;
            }
        }
    }
    if cursor.remaining() != 0 {
        return Err(Error::new(ErrorKind::GrammarMismatch, cursor.offset()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, crate::asn1::tag, hex_literal::hex};

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Act {
        First,
        Second,
        Item,
    }

    const fn leaf(name: &'static str, spec: TagSpec, card: Cardinality, act: Act) -> Element<Act> {
        Element {
            name,
            matcher: Matcher::Tag(spec),
            cardinality: card,
            action: Some(act),
            shape: Shape::Leaf,
        }
    }

    #[test]
    fn required_and_optional() {
        const GRAMMAR: &[Element<Act>] = &[
            leaf(
                "first",
                TagSpec::universal(tag::INTEGER),
                Cardinality::Required,
                Act::First,
            ),
            leaf(
                "missing",
                TagSpec::universal(tag::BOOLEAN),
                Cardinality::Optional,
                Act::Item,
            ),
            leaf(
                "second",
                TagSpec::universal(tag::OCTET_STRING),
                Cardinality::Required,
                Act::Second,
            ),
        ];
        let buf = hex!("02 01 07 04 02 aa bb");
        let mut seen = Vec::new();
        run(GRAMMAR, &mut Cursor::new(&buf), &mut |act, node| {
            seen.push((act, node.value.to_vec()));
            Ok(())
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                (Act::First, vec![0x07]),
                (Act::Second, vec![0xaa, 0xbb]),
            ]
        );
    }

    #[test]
    fn required_mismatch_fails() {
        const GRAMMAR: &[Element<Act>] = &[leaf(
            "first",
            TagSpec::universal(tag::OID),
            Cardinality::Required,
            Act::First,
        )];
        let buf = hex!("02 01 07");
        let err = run(GRAMMAR, &mut Cursor::new(&buf), &mut |_, _| Ok(())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
    }

    #[test]
    fn zero_or_more_repeats() {
        const GRAMMAR: &[Element<Act>] = &[leaf(
            "items",
            TagSpec::universal(tag::INTEGER),
            Cardinality::ZeroOrMore,
            Act::Item,
        )];
        let buf = hex!("02 01 01 02 01 02 02 01 03");
        let mut count = 0;
        run(GRAMMAR, &mut Cursor::new(&buf), &mut |_, _| {
            count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 3);

        // Zero matches is also fine.
        run(GRAMMAR, &mut Cursor::new(&[]), &mut |_, _| Ok(())).unwrap();
    }

    #[test]
    fn choice_first_match_wins() {
        const TIME: &[TagSpec] = &[
            TagSpec::universal(tag::UTC_TIME),
            TagSpec::universal(tag::GENERALIZED_TIME),
        ];
        const GRAMMAR: &[Element<Act>] = &[Element {
            name:        "time",
            matcher:     Matcher::OneOf(TIME),
            cardinality: Cardinality::Required,
            action:      Some(Act::First),
            shape:       Shape::Leaf,
        }];
        let buf = hex!("18 0f 32 30 31 39 31 30 31 38 30 33 31 33 33 31 5a");
        let mut matched = 0;
        run(GRAMMAR, &mut Cursor::new(&buf), &mut |_, node| {
            matched = node.number;
            Ok(())
        })
        .unwrap();
        assert_eq!(matched, tag::GENERALIZED_TIME);
    }

    #[test]
    fn nested_descends() {
        const INNER: &[Element<Act>] = &[leaf(
            "inner",
            TagSpec::universal(tag::INTEGER),
            Cardinality::Required,
            Act::Second,
        )];
        const GRAMMAR: &[Element<Act>] = &[Element {
            name:        "outer",
            matcher:     Matcher::Tag(TagSpec::universal(tag::SEQUENCE)),
            cardinality: Cardinality::Required,
            action:      Some(Act::First),
            shape:       Shape::Nested(INNER),
        }];
        let buf = hex!("30 03 02 01 2a");
        let mut seen = Vec::new();
        run(GRAMMAR, &mut Cursor::new(&buf), &mut |act, _| {
            seen.push(act);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![Act::First, Act::Second]);
    }

    #[test]
    fn trailing_bytes_in_scope_fail() {
        const GRAMMAR: &[Element<Act>] = &[leaf(
            "only",
            TagSpec::universal(tag::INTEGER),
            Cardinality::Required,
            Act::First,
        )];
        let buf = hex!("02 01 07 05 00");
        let err = run(GRAMMAR, &mut Cursor::new(&buf), &mut |_, _| Ok(())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
    }
}
