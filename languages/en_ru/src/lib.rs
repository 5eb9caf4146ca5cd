pub mod loader;
pub mod morphology;
pub mod translator;
pub mod wordlist;

pub use loader::GlossaryLoader;
pub use morphology::EnglishMorphology;
pub use translator::{GoogleSynonymTranslator, LibreTranslator, MyMemoryTranslator};
pub use wordlist::WordList;
