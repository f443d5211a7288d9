pub(crate) mod health;
pub(crate) mod matching;
pub(crate) mod producers;
