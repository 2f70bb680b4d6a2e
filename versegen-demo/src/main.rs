mod corpus;
mod lexicon;

use versegen_core::generate::SeedPhrase;
use versegen_core::model::language_model::LanguageModel;
use versegen_core::phrase::compose_phrase;
use versegen_core::song::{compose_song, rhymed_verse};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // The embedded corpus and lexicon stand in for the data directories
    // of a full deployment
    let lexicon = lexicon::Lexicon::embedded()?;
    let sentences = corpus::prepare(corpus::RAW_LYRICS);
    log::info!("training on {} sentences", sentences.len());

    let mut model = LanguageModel::new();
    model.train(&sentences);
    println!("{model}");
    println!();

    // Callers own the random source; a seeded StdRng here would make
    // the whole run reproducible
    let mut rng = rand::rng();

    // Seed word for the themed phrase, overridable from the command line
    let seed_word = std::env::args().nth(1).unwrap_or_else(|| "night".to_owned());

    // Build a themed phrase around the seed word, then a rhymed verse
    // where the phrase opens and closes the stanza
    let phrase = compose_phrase(&model, &seed_word, &lexicon, &mut rng)?;
    println!("Phrase: {phrase}");
    println!();

    let seed = SeedPhrase::new(&seed_word, &phrase);
    let verse = rhymed_verse(&model, &seed, &lexicon, &mut rng)?;
    println!("{verse}");

    // And a full song in verse-chorus-verse-chorus form
    let song = compose_song(&model, &mut rng)?;
    println!("{song}");

    Ok(())
}
