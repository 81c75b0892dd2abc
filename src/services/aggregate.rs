//! Folds flat board rows into the nested [`BoardView`].

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{
    Board, BoardView, Card, CardTag, CardView, Comment, CommentView, List, ListView, Tag,
    TagView, User,
};

/// Rows fetched for one board, all read from the same snapshot.
#[derive(Debug, Default)]
pub struct BoardRows {
    pub lists: Vec<List>,
    pub cards: Vec<Card>,
    pub card_tags: Vec<CardTag>,
    pub comments: Vec<Comment>,
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
}

/// Build the nested view.
///
/// Lists keep the order they were fetched in, and so do cards within each
/// list; nothing is re-sorted here. Tag associations pointing at a missing
/// tag are dropped. Unknown assignees and comment authors resolve to `None`.
pub fn build_board_view(board: Board, rows: &BoardRows) -> BoardView {
    let user_names: HashMap<Uuid, &str> = rows
        .users
        .iter()
        .map(|user| (user.id, user.name.as_str()))
        .collect();

    let tags_by_id: HashMap<Uuid, &Tag> = rows.tags.iter().map(|tag| (tag.id, tag)).collect();

    let mut tags_by_card: HashMap<Uuid, Vec<TagView>> = HashMap::new();
    for card_tag in &rows.card_tags {
        if let Some(tag) = tags_by_id.get(&card_tag.tag_id) {
            tags_by_card
                .entry(card_tag.card_id)
                .or_default()
                .push(TagView::from(*tag));
        }
    }

    let mut comments_by_card: HashMap<Uuid, Vec<CommentView>> = HashMap::new();
    for comment in &rows.comments {
        comments_by_card
            .entry(comment.card_id)
            .or_default()
            .push(CommentView {
                id: comment.id,
                text: comment.text.clone(),
                user_id: comment.user_id,
                user_name: user_names.get(&comment.user_id).map(|name| name.to_string()),
                created_at: comment.created_at,
            });
    }

    let mut cards_by_list: HashMap<Uuid, Vec<CardView>> = HashMap::new();
    for card in &rows.cards {
        let view = CardView {
            id: card.id,
            title: card.title.clone(),
            description: card.description.clone(),
            assignee_id: card.assignee_id,
            assignee_name: card
                .assignee_id
                .and_then(|id| user_names.get(&id))
                .map(|name| name.to_string()),
            position: card.position,
            completed: card.completed,
            tags: tags_by_card.remove(&card.id).unwrap_or_default(),
            comments: comments_by_card.remove(&card.id).unwrap_or_default(),
        };
        cards_by_list.entry(card.list_id).or_default().push(view);
    }

    let lists = rows
        .lists
        .iter()
        .map(|list| ListView {
            id: list.id,
            title: list.title.clone(),
            position: list.position,
            role: list.role,
            cards: cards_by_list.remove(&list.id).unwrap_or_default(),
        })
        .collect();

    BoardView {
        id: board.id,
        title: board.title,
        description: board.description,
        created_at: board.created_at,
        lists,
    }
}
