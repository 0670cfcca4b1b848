use journal_censor::{Banned, Censor, CensorStr};

fn main() {
    // Text without banned tokens is returned untouched, casing included.
    show_censor("Walked the Dog at 6am");

    // Standalone short tokens and long tokens anywhere are redacted.
    show_censor("hey niga, NIGGA please");

    // Short tokens inside longer words are left alone.
    show_censor("banigax");

    let banned = Banned::from_tokens(["darn", "heckfire"]);
    let censor = Censor::new(&banned);
    println!("{}", censor.censor("Darn, HECKFIRES everywhere. darn it."));
}

fn show_censor(text: &str) {
    println!("{} -> {}", text, text.censor());
}
