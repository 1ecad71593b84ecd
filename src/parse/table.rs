//! The parser's transition table.
//!
//! Each row maps a `(state, token)` pair to the next state and the action the builder performs
//! on the token. A pair with no row is a syntax error.
use crate::token::TokenKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParserState {
    Begin,
    InHeader,
    InStart,
    InEntry,
    InKey,
    OutKey,
    InStringEntry,
    InTagName,
    InTagEqual,
    InTagValue,
    OutTagValue,
    InComment,
    OutEntry,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuilderAction {
    SetHeader,
    SetType,
    SetKey,
    SetTagName,
    SetTagValue,
    SetTag,
    Build,
    Skip,
}

use BuilderAction::*;
use ParserState::*;
use TokenKind as T;

type Row = ((ParserState, TokenKind), (ParserState, BuilderAction));

pub static TRANSITIONS: &[Row] = &[
    ((Begin, T::Comment), (InHeader, SetHeader)),
    ((Begin, T::Start), (InStart, Skip)),
    ((Begin, T::EndOfInput), (Begin, Skip)),
    ((InHeader, T::Comment), (InHeader, SetHeader)),
    ((InHeader, T::Start), (InStart, Skip)),
    ((InHeader, T::EndOfInput), (InHeader, Skip)),
    ((InStart, T::Name), (InEntry, SetType)),
    ((InStart, T::StringTypeMarker), (InStringEntry, SetType)),
    ((InEntry, T::LeftBrace), (InKey, Skip)),
    ((InStringEntry, T::LeftBrace), (InTagName, Skip)),
    ((InStringEntry, T::LeftParen), (InTagName, Skip)),
    ((InKey, T::RightBrace), (OutEntry, Build)),
    ((InKey, T::Name), (OutKey, SetKey)),
    ((InKey, T::StringTypeMarker), (OutKey, SetKey)),
    ((InKey, T::QuotedString), (OutKey, SetKey)),
    ((InKey, T::BracedString), (OutKey, SetKey)),
    ((InKey, T::Comma), (InTagName, Skip)),
    ((OutKey, T::Comma), (InTagName, Skip)),
    ((OutKey, T::RightBrace), (OutEntry, Build)),
    ((InTagName, T::Name), (InTagEqual, SetTagName)),
    ((InTagName, T::StringTypeMarker), (InTagEqual, SetTagName)),
    ((InTagName, T::RightBrace), (OutEntry, Build)),
    ((InTagEqual, T::Equal), (InTagValue, Skip)),
    ((InTagValue, T::QuotedString), (OutTagValue, SetTagValue)),
    ((InTagValue, T::BracedString), (OutTagValue, SetTagValue)),
    ((InTagValue, T::Name), (OutTagValue, SetTagValue)),
    ((InTagValue, T::StringTypeMarker), (OutTagValue, SetTagValue)),
    ((OutTagValue, T::Concatenation), (InTagValue, Skip)),
    ((OutTagValue, T::Comma), (InTagName, SetTag)),
    ((OutTagValue, T::RightBrace), (OutEntry, Build)),
    ((OutTagValue, T::RightParen), (OutEntry, Build)),
    ((OutTagValue, T::Comment), (OutTagValue, Skip)),
    ((OutEntry, T::Start), (InStart, Skip)),
    ((OutEntry, T::Comment), (InComment, Skip)),
    ((OutEntry, T::EndOfInput), (OutEntry, Skip)),
    ((InComment, T::Start), (InStart, Skip)),
    ((InComment, T::Comment), (InComment, Skip)),
];

/// The next state and action for `kind` in `state`, or `None` if `kind` is not allowed there.
pub fn transition(state: ParserState, kind: TokenKind) -> Option<(ParserState, BuilderAction)> {
    TRANSITIONS
        .iter()
        .find(|(from, _)| *from == (state, kind))
        .map(|(_, to)| *to)
}

/// Every token kind `state` accepts, in table order.
pub fn expected(state: ParserState) -> Vec<TokenKind> {
    TRANSITIONS
        .iter()
        .filter(|((from, _), _)| *from == state)
        .map(|((_, kind), _)| *kind)
        .collect()
}
