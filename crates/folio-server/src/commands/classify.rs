use folio_interaction::classify;

pub fn run(message: &str) {
    println!("{}", classify(message));
}
