use selprompt::{
    item::Choice,
    query::{Query, QueryBuilder},
};

fn main() {
    env_logger::init();

    let choices = vec![
        Choice::new("apple").with_message("Apple"),
        Choice::new("banana").with_message("Banana").with_hint("ripe"),
        Choice::new("durian").with_message("Durian").disabled(),
        Choice::new("kiwi").with_message("Kiwi"),
    ];
    match QueryBuilder::default()
        .with_prompt("Which fruit is your favorite?")
        .select(choices)
        .show()
    {
        Ok(answer) => println!("Your favorite fruit is {}!", answer.into_vec().join("")),
        Err(e) if e.is_cancelled() => println!("Maybe next time."),
        Err(e) => eprintln!("error: {e}"),
    }
}
