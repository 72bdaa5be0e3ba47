use crate::io::paths::abbreviate_path;
use crate::model::{Target, TargetKind};
use crate::util::unicode;

use super::app::{InlineEdit, MoveState};

/// The transient UI state that affects how cards look.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState<'a> {
    pub cursor: usize,
    pub editing: Option<&'a InlineEdit>,
    pub move_state: Option<MoveState>,
}

/// What the body of a card shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    /// Integer target: the current value between the step buttons
    Counter(i64),
    /// String target: content split into lines (empty = no content)
    Text(Vec<String>),
    /// String target being edited inline; cursor is (line, display column)
    Editing {
        lines: Vec<String>,
        cursor_line: usize,
        cursor_col: usize,
    },
}

/// One target as the render layer paints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCard {
    /// 1-based position as displayed
    pub number: usize,
    /// Index in the registry
    pub index: usize,
    pub name: String,
    pub kind: TargetKind,
    pub path: String,
    pub body: CardBody,
    pub selected: bool,
    pub moving: bool,
}

/// Build the cards for the current list. During a move the cards are shown
/// in the order they will have once the move is committed.
pub fn build_view(targets: &[Target], state: &ViewState) -> Vec<TargetCard> {
    let order = display_order(targets.len(), state.move_state);

    order
        .into_iter()
        .enumerate()
        .map(|(pos, index)| {
            let target = &targets[index];
            let moving = state.move_state.is_some_and(|ms| ms.from == index);
            let selected = match state.move_state {
                Some(_) => moving,
                None => pos == state.cursor,
            };
            let editing = state.editing.filter(|e| e.index == index);

            TargetCard {
                number: pos + 1,
                index,
                name: target.display_name.clone(),
                kind: target.kind,
                path: abbreviate_path(&target.path),
                body: card_body(target, editing),
                selected,
                moving,
            }
        })
        .collect()
}

fn display_order(len: usize, move_state: Option<MoveState>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    if let Some(MoveState { from, to }) = move_state
        && from < len
        && to < len
    {
        let moved = order.remove(from);
        order.insert(to, moved);
    }
    order
}

fn card_body(target: &Target, editing: Option<&InlineEdit>) -> CardBody {
    if let Some(edit) = editing {
        let before = &edit.buffer[..edit.cursor.min(edit.buffer.len())];
        let cursor_line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        return CardBody::Editing {
            lines: edit.buffer.split('\n').map(String::from).collect(),
            cursor_line,
            cursor_col: unicode::display_width(&before[line_start..]),
        };
    }

    match target.kind {
        TargetKind::Integer => CardBody::Counter(target.value()),
        TargetKind::String => CardBody::Text(target.content.lines().map(String::from).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn targets() -> Vec<Target> {
        vec![
            Target {
                path: "/t/a.txt".into(),
                display_name: "Alpha".into(),
                kind: TargetKind::Integer,
                content: "7".into(),
            },
            Target {
                path: "/t/b.txt".into(),
                display_name: "Beta".into(),
                kind: TargetKind::String,
                content: "line one\nline two".into(),
            },
            Target {
                path: "/t/c.txt".into(),
                display_name: "Gamma".into(),
                kind: TargetKind::String,
                content: String::new(),
            },
        ]
    }

    #[test]
    fn cards_follow_list_order() {
        let cards = build_view(&targets(), &ViewState::default());
        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(cards[0].number, 1);
        assert!(cards[0].selected);
        assert!(!cards[1].selected);
    }

    #[test]
    fn bodies_by_kind() {
        let cards = build_view(&targets(), &ViewState::default());
        assert_eq!(cards[0].body, CardBody::Counter(7));
        assert_eq!(
            cards[1].body,
            CardBody::Text(vec!["line one".into(), "line two".into()])
        );
        assert_eq!(cards[2].body, CardBody::Text(vec![]));
    }

    #[test]
    fn unparseable_integer_shows_zero() {
        let mut list = targets();
        list[0].content = "abc".into();
        let cards = build_view(&list, &ViewState::default());
        assert_eq!(cards[0].body, CardBody::Counter(0));
    }

    #[test]
    fn editing_card_reports_cursor_position() {
        let list = targets();
        let edit = InlineEdit {
            index: 1,
            buffer: "ab\ncdé".into(),
            cursor: "ab\ncd".len(),
            sticky_col: None,
        };
        let state = ViewState {
            cursor: 1,
            editing: Some(&edit),
            move_state: None,
        };
        let cards = build_view(&list, &state);
        assert_eq!(
            cards[1].body,
            CardBody::Editing {
                lines: vec!["ab".into(), "cdé".into()],
                cursor_line: 1,
                cursor_col: 2,
            }
        );
        // Other string cards are unaffected
        assert_eq!(cards[2].body, CardBody::Text(vec![]));
    }

    #[test]
    fn move_previews_final_order() {
        let state = ViewState {
            cursor: 2,
            editing: None,
            move_state: Some(MoveState { from: 0, to: 2 }),
        };
        let cards = build_view(&targets(), &state);
        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Gamma", "Alpha"]);
        assert_eq!(cards[2].number, 3);
        assert_eq!(cards[2].index, 0);
        assert!(cards[2].moving && cards[2].selected);
        assert!(!cards[0].selected);
    }

    #[test]
    fn empty_list_has_no_cards() {
        assert!(build_view(&[], &ViewState::default()).is_empty());
    }
}
