use pwdgen_core::{Error, PasswordEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=pwdgen_core=debug shows word-list loads and injection points
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Word lists are read from "words/<language>.txt"
    let mut app = PasswordEngine::new("./words");

    // Number of digits and punctuation symbols added to every password
    app.config_mut().set_num_digits(2);
    app.config_mut().set_num_punctuation_symbols(1);

    // Symbols the punctuation is drawn from (one character each)
    app.config_mut().set_punctuation_alphabet(["!", "(", ")", "[", "]", ":", ";", ",", "?"])?;

    // Symbols can also be added or removed one by one
    app.config_mut().add_punctuation_symbol("#")?;
    app.config_mut().remove_punctuation_symbol(",")?;

    // Properties can be set by name, from text
    app.configure("min_length", "12")?;

    // Invalid values are rejected and the previous value is kept
    match app.configure("min_length", "-1") {
        Ok(_) => println!("Should not happen"),
        Err(Error::InvalidValue { .. }) => println!("min_length -1 is invalid, still {}", app.get("min_length")?),
        Err(e) => return Err(e.into()),
    }
    match app.config_mut().add_punctuation_symbol("!!") {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("'!!' is not a single character"),
    }

    // A language needs a word list
    match app.set_language("xx") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    // One word password per available language
    for language in app.words().languages()? {
        app.set_language(&language)?;
        println!("Word password ({}): {}", language, app.generate_word_password()?);
    }

    println!("Nonsense password: {}", app.generate_nonsense_password()?);

    // Body length of random passwords, digits and punctuation come on top
    println!("Random password: {}", app.generate_random(Some(12))?);
    println!("Random password (default length): {}", app.generate_random(None)?);

    Ok(())
}
