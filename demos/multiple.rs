use std::time::Duration;

use selprompt::{
    item::{Choice, Field},
    query::{Query, QueryBuilder},
};

const LANGUAGES: &[&str] = &[
    "Ada", "Basic", "Dart", "Erlang", "Fortran", "Haskell", "Julia", "Kotlin", "Lua", "OCaml",
    "Rust", "Scala", "Zig",
];

fn main() {
    env_logger::init();

    // Hints are computed on a worker thread, as if they came from a slow lookup.
    let choices = LANGUAGES.iter().map(|&lang| {
        Choice::new(lang).with_hint(Field::future(|choice, _| {
            let (tx, rx) = futures::channel::oneshot::channel();
            let name = choice.name.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                let _ = tx.send(format!("{} letters", name.len()));
            });
            async move { Ok(rx.await?) }
        }))
    });

    let answer = QueryBuilder::default()
        .with_prompt("Which languages do you like?")
        .select(choices)
        .many()
        .with_rows(5)
        .with_footer("a: toggle all, i: invert")
        .show();
    match answer {
        Ok(answer) => println!("You like {:?}.", answer.into_vec()),
        Err(e) if e.is_cancelled() => println!("Maybe next time."),
        Err(e) => eprintln!("error: {e}"),
    }
}
