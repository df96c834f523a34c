//! Todo lists driven by a combined reducer, with memoized statistics.
//!
//! Run with `RUST_LOG=unistate=trace` to see dispatches and selector hits.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use unistate::{boxed_reducer, combine_reducers, create_selector, create_store, BoxedReducer, Slices};

#[derive(Clone, Debug)]
struct TodoItem {
    id: usize,
    title: String,
    completed: bool,
}

#[derive(Clone, Debug, Default)]
struct TodoList {
    todos: Vec<TodoItem>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TodoFilter {
    All,
    Active,
    Completed,
}

#[derive(Debug)]
enum Action {
    Add { list: &'static str, title: &'static str },
    Toggle { list: &'static str, id: usize },
}

fn list_reducer(name: &'static str) -> BoxedReducer<TodoList, Action> {
    boxed_reducer(move |list: &Arc<TodoList>, action: &Action| match action {
        Action::Add { list: target, title } if *target == name => {
            let mut todos = list.todos.clone();
            todos.push(TodoItem {
                id: todos.len(),
                title: title.to_string(),
                completed: false,
            });
            Arc::new(TodoList { todos })
        }
        Action::Toggle { list: target, id } if *target == name => {
            if !list.todos.iter().any(|t| t.id == *id) {
                return Arc::clone(list);
            }
            let todos = list
                .todos
                .iter()
                .map(|t| TodoItem {
                    completed: t.completed ^ (t.id == *id),
                    ..t.clone()
                })
                .collect();
            Arc::new(TodoList { todos })
        }
        _ => Arc::clone(list),
    })
}

fn print_lists(state: &Slices<&'static str, TodoList>, filter: TodoFilter) {
    for (name, list) in state {
        println!("   {name}:");
        let visible = list.todos.iter().filter(|t| match filter {
            TodoFilter::All => true,
            TodoFilter::Active => !t.completed,
            TodoFilter::Completed => t.completed,
        });
        for todo in visible {
            let status = if todo.completed { "✓" } else { " " };
            println!("     [{}] {}", status, todo.title);
        }
    }
}

fn main() -> unistate::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Store Example: Todo App ===\n");

    let reducer = combine_reducers([("home", list_reducer("home")), ("work", list_reducer("work"))])?;
    let store = create_store(reducer, Slices::new());

    let stats = create_selector(
        ({
            let store = store.clone();
            move || store.state()
        },),
        |(state,)| {
            let total: usize = state.values().map(|l| l.todos.len()).sum();
            let completed = state
                .values()
                .flat_map(|l| l.todos.iter())
                .filter(|t| t.completed)
                .count();
            (total, total - completed, completed)
        },
    );

    println!("1. Adding todos");
    store.dispatch(Action::Add { list: "work", title: "Learn Rust" });
    store.dispatch(Action::Add { list: "work", title: "Build state library" });
    store.dispatch(Action::Add { list: "home", title: "Write documentation" });

    println!("\n2. Current todos:");
    store.read(|state| print_lists(state, TodoFilter::All));

    println!("\n3. Completing first work todo");
    store.dispatch(Action::Toggle { list: "work", id: 0 });

    println!("\n4. Toggling a todo that does not exist (state unchanged)");
    let before = store.state();
    store.dispatch(Action::Toggle { list: "home", id: 42 });
    println!("   same state: {}", Arc::ptr_eq(&before, &store.state()));

    for filter in [TodoFilter::Active, TodoFilter::Completed] {
        println!("\n5. {filter:?} todos:");
        store.read(|state| print_lists(state, filter));
    }

    let computed = stats.get();
    let (total, active, completed) = *computed;
    println!(
        "\n   stats served from cache: {}",
        Arc::ptr_eq(&computed, &stats.get())
    );
    println!("\n6. Final statistics:");
    println!("   Total: {}", total);
    println!("   Active: {}", active);
    println!("   Completed: {}", completed);
    println!("   Stats computed {} time(s)", stats.recomputations());

    println!("\n✓ Example complete!");
    Ok(())
}
