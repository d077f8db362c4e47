use super::*;
use crate::boundary::Token;

fn boundary(left_end: usize, right_end: usize) -> Boundary {
    Boundary::new(Token::new("l", left_end), Token::new("r", right_end))
}

#[test]
fn kind_widths() {
    assert_eq!(SplitKind::Space.width(), 1);
    assert_eq!(SplitKind::Nothing.width(), 0);
    assert_eq!(SplitKind::NEWLINE.width(), 0);
    assert_eq!(SplitKind::Literal(", ".to_string()).width(), 2);
}

#[test]
fn newline_flags_only_apply_to_newlines() {
    let split = Split::newline(1).blank_line().no_indent();
    assert_eq!(
        split.kind,
        SplitKind::Newline {
            blank_line: true,
            no_indent: true,
        }
    );

    let space = Split::space(0).blank_line().no_indent();
    assert_eq!(space.kind, SplitKind::Space);
}

#[test]
fn builder_sets_fields() {
    let push = IndentPush::new(4, Side::Right, 20);
    let split = Split::newline(2)
        .with_push(push)
        .with_policy(Policy::Unbroken { until: 30 })
        .optimal_at(OptimalMarker::new(7));
    assert!(split.is_newline());
    assert_eq!(split.cost, 2);
    assert_eq!(split.pushes.as_slice(), &[push]);
    assert_eq!(split.policy, Some(Policy::Unbroken { until: 30 }));
    assert_eq!(split.optimal_at.map(OptimalMarker::raw), Some(7));
}

#[test]
fn with_cost_keeps_everything_else() {
    let split = Split::literal(",", 3).with_push(IndentPush::new(2, Side::Left, 5));
    let penalized = split.with_cost(10_010);
    assert_eq!(penalized.cost, 10_010);
    assert_eq!(penalized.kind, split.kind);
    assert_eq!(penalized.pushes, split.pushes);
}

#[test]
fn push_until_resolves_side() {
    let target = boundary(12, 15);
    assert_eq!(IndentPush::until(2, &target, Side::Left).expiry.position, 12);
    assert_eq!(IndentPush::until(2, &target, Side::Right).expiry.position, 15);
}

#[test]
fn expiry_live_through_target() {
    let expiry = Expiry {
        side: Side::Right,
        position: 15,
    };
    assert!(expiry.is_live_at(&boundary(5, 10)));
    assert!(expiry.is_live_at(&boundary(12, 15)));
    assert!(!expiry.is_live_at(&boundary(15, 18)));
}

#[test]
fn expiry_left_side_uses_left_token() {
    let expiry = Expiry {
        side: Side::Left,
        position: 15,
    };
    assert!(expiry.is_live_at(&boundary(15, 18)));
    assert!(!expiry.is_live_at(&boundary(18, 20)));
}
