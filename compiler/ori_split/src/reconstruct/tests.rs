use pretty_assertions::assert_eq;

use super::*;
use crate::boundary::Token;
use crate::error::SearchError;
use crate::split::{IndentPush, Side};

fn limit(width: u32) -> Limit {
    Limit::new(width).unwrap()
}

fn texts(reconstruction: &Reconstruction) -> Vec<&str> {
    reconstruction.gaps.iter().map(|g| g.text.as_str()).collect()
}

#[test]
fn renders_each_kind() {
    let boundaries = Boundary::chain(["a", "b", "c", "d"]);
    let splits = [
        Split::nothing(0),
        Split::space(0),
        Split::literal(", ", 0),
        Split::newline(0),
    ];
    let result = reconstruct(&boundaries, &splits, limit(100)).unwrap();
    assert_eq!(texts(&result), vec!["", " ", ", ", "\n"]);
    assert_eq!(result.render(&boundaries), "a b, c\nd");
    assert_eq!(result.cost, 0);
    let indices: Vec<usize> = result.gaps.iter().map(|g| g.boundary).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn newline_uses_post_transition_indentation() {
    let boundaries = Boundary::chain(["call(", "arg", ")"]);
    let push = IndentPush::until(4, &boundaries[1], Side::Right);
    let splits = [
        Split::nothing(0),
        Split::newline(0).with_push(push),
        Split::newline(0),
    ];
    let result = reconstruct(&boundaries, &splits, limit(100)).unwrap();
    assert_eq!(result.render(&boundaries), "call(\n    arg\n)");
}

#[test]
fn blank_line_and_no_indent() {
    let boundaries = Boundary::chain(["x", "y", "z"]);
    let push = IndentPush::until(2, &boundaries[2], Side::Right);
    let splits = [
        Split::nothing(0).with_push(push),
        Split::newline(0).blank_line(),
        Split::newline(0).no_indent(),
    ];
    let result = reconstruct(&boundaries, &splits, limit(100)).unwrap();
    assert_eq!(texts(&result), vec!["", "\n\n  ", "\n"]);
    assert_eq!(result.render(&boundaries), "x\n\n  y\nz");
}

#[test]
fn cost_includes_overflow() {
    let boundaries = Boundary::chain(["aaaa", "bbbb"]);
    let splits = [Split::nothing(1), Split::space(2)];
    let result = reconstruct(&boundaries, &splits, limit(8)).unwrap();
    assert_eq!(result.cost, 1 + 2 + 10_000 + 9);
}

#[test]
fn render_keeps_nonempty_first_left_token() {
    let boundaries = vec![Boundary::new(Token::new("{", 1), Token::new("}", 2))];
    let result = reconstruct(&boundaries, &[Split::space(0)], limit(10)).unwrap();
    assert_eq!(result.render(&boundaries), "{ }");
}

#[test]
fn emit_path_streams_whole_output() {
    let boundaries = Boundary::chain(["let", "x", "=", "1"]);
    let splits = [
        Split::nothing(0),
        Split::space(0),
        Split::space(0),
        Split::space(0),
    ];
    let mut emitter = StringEmitter::new();
    let cost = emit_path(&boundaries, &splits, limit(100), &mut emitter).unwrap();
    assert_eq!(cost, 0);
    assert_eq!(emitter.output(), "let x = 1");
}

#[test]
fn length_mismatch_is_rejected() {
    let boundaries = Boundary::chain(["a", "b"]);
    let err = reconstruct(&boundaries, &[Split::space(0)], limit(10)).unwrap_err();
    assert_eq!(
        err,
        SearchError::from(InvalidInput::LengthMismatch {
            boundaries: 2,
            splits: 1,
        })
    );
}

#[test]
fn empty_stream() {
    let result = reconstruct(&[], &[], limit(10)).unwrap();
    assert!(result.gaps.is_empty());
    assert_eq!(result.cost, 0);
    assert_eq!(result.render(&[]), "");
}
