//! Property tests for reducer composition.

use folio_types::{Author, Book, Event};
use proptest::prelude::*;

use crate::kernel::Combiner;
use crate::library::{AUTHORS, AuthorsReducer, BOOKS, BooksReducer, LibraryOptions, library_reducer};
use crate::reducer::{Reducer, reducer_fn};
use crate::replay::replay;

// ============================================================================
// Strategies
// ============================================================================

fn name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}( [A-Z][a-z]{0,6})?"
}

fn book() -> impl Strategy<Value = Book> {
    (name(), proptest::option::of(name())).prop_map(|(title, author)| Book { title, author })
}

fn books() -> impl Strategy<Value = Vec<Book>> {
    prop::collection::vec(book(), 0..8)
}

fn authors() -> impl Strategy<Value = Vec<Author>> {
    prop::collection::vec(name().prop_map(Author::new), 0..8)
}

fn unknown_event() -> impl Strategy<Value = Event> {
    "[A-Z_]{1,12}"
        .prop_filter("must not be a library tag", |tag| {
            !matches!(
                tag.as_str(),
                "ADD_AUTHOR" | "REMOVE_AUTHOR" | "ADD_BOOK" | "REMOVE_BOOK"
            )
        })
        .prop_map(Event::other)
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        name().prop_map(Event::add_author),
        name().prop_map(Event::remove_author),
        book().prop_map(Event::add_book),
        name().prop_map(Event::remove_book),
        unknown_event(),
    ]
}

proptest! {
    #[test]
    fn unknown_events_are_identity(
        state_books in books(),
        state_authors in authors(),
        event in unknown_event(),
        register in any::<bool>(),
    ) {
        prop_assert_eq!(BooksReducer.reduce(&state_books, &event), state_books);

        let reducer = AuthorsReducer { register_from_books: register };
        prop_assert_eq!(reducer.reduce(&state_authors, &event), state_authors);
    }

    #[test]
    fn initial_state_is_each_slice_from_absent(event in event(), register in any::<bool>()) {
        let root = library_reducer(LibraryOptions { register_authors_from_books: register })
            .expect("compose");
        let authors_reducer = AuthorsReducer { register_from_books: register };

        let state = root.reduce(None, &event);

        prop_assert_eq!(state.get::<Vec<Book>>(BOOKS), Some(&BooksReducer.reduce_slice(None, &event)));
        prop_assert_eq!(state.get::<Vec<Author>>(AUTHORS), Some(&authors_reducer.reduce_slice(None, &event)));
    }

    #[test]
    fn slices_are_isolated(history in prop::collection::vec(event(), 1..20), bump in 2_u64..100) {
        // Two roots sharing `books`, differing only in the second slice.
        let plain = Combiner::new()
            .slice(BOOKS, BooksReducer)
            .and_then(|c| c.slice("tally", reducer_fn(0_u64, |n: &u64, _: &Event| n + 1)))
            .expect("compose")
            .build();
        let bumped = Combiner::new()
            .slice(BOOKS, BooksReducer)
            .and_then(|c| c.slice("tally", reducer_fn(0_u64, move |n: &u64, _: &Event| n + bump)))
            .expect("compose")
            .build();

        let left = replay(&plain, &history);
        let right = replay(&bumped, &history);

        prop_assert_eq!(left.get::<Vec<Book>>(BOOKS), right.get::<Vec<Book>>(BOOKS));
        prop_assert_ne!(left.get::<u64>("tally"), right.get::<u64>("tally"));
    }

    #[test]
    fn remove_undoes_append(state in books(), item in book()) {
        let appended = BooksReducer.reduce(&state, &Event::add_book(item.clone()));
        let restored = BooksReducer.reduce(&appended, &Event::remove_book(item.title));
        prop_assert_eq!(restored, state);
    }

    #[test]
    fn remove_author_undoes_add_author(state in authors(), author in name()) {
        let reducer = AuthorsReducer::default();
        let appended = reducer.reduce(&state, &Event::add_author(author.clone()));
        let restored = reducer.reduce(&appended, &Event::remove_author(author));
        prop_assert_eq!(restored, state);
    }

    #[test]
    fn key_set_is_always_the_registered_set(history in prop::collection::vec(event(), 0..30)) {
        let root = library_reducer(LibraryOptions::default()).expect("compose");
        let mut state = root.reduce(None, &Event::other("@@INIT"));

        for event in &history {
            state = root.reduce(Some(&state), event);
            let names: Vec<&str> = state.names().map(|n| n.as_str()).collect();
            prop_assert_eq!(names, vec![AUTHORS, BOOKS]);
        }
    }

    #[test]
    fn replay_is_deterministic(history in prop::collection::vec(event(), 0..30), register in any::<bool>()) {
        let root = library_reducer(LibraryOptions { register_authors_from_books: register })
            .expect("compose");
        prop_assert_eq!(replay(&root, &history), replay(&root, &history));
    }
}
