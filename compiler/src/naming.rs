//! Names derived for anonymous types and collection elements.
//!
//! Only the trailing word of a camel-case identifier is inflected, so
//! `heroSkills` singularizes to `heroSkill` and `dropItem` pluralizes to
//! `dropItems`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CAMEL_WORD: Regex = Regex::new(r"^[a-z]+|[A-Z][^A-Z]*").unwrap();
}

/// English noun inflection. Implementations may be swapped in wherever a
/// name is derived, e.g. to stub the word tables in tests.
pub trait Inflector {
    fn plural(&self, word: &str) -> String;
    fn singular(&self, word: &str) -> String;
}

/// The standard English plural/singular tables, irregular nouns included.
#[derive(Debug, Default, Clone, Copy)]
pub struct English;

impl Inflector for English {
    fn plural(&self, word: &str) -> String {
        pluralizer::pluralize(word, 2, false)
    }

    fn singular(&self, word: &str) -> String {
        pluralizer::pluralize(word, 1, false)
    }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn upper_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Type name for an anonymous struct (`prefix` `S`) or enum (`E`). When
/// capitalizing does not change the field name, the prefix is prepended so
/// the type name never equals the field name.
pub fn synthetic_type_name(prefix: &str, field_name: &str) -> String {
    let camel = upper_camel_case(field_name);
    if camel == field_name {
        format!("{}{}", prefix, field_name)
    } else {
        camel
    }
}

pub fn pluralize(name: &str) -> String {
    pluralize_with(&English, name)
}

pub fn singularize(name: &str) -> String {
    singularize_with(&English, name)
}

pub fn pluralize_with(inflector: &dyn Inflector, name: &str) -> String {
    inflect_last_word(name, |word| inflector.plural(word))
}

pub fn singularize_with(inflector: &dyn Inflector, name: &str) -> String {
    inflect_last_word(name, |word| inflector.singular(word))
}

/// Splits `name` into everything before its last camel-case word and that
/// word. Identifiers that do not end in a camel-case word (`hp2`,
/// `item_list`) have no inflectable word and yield `None`.
fn split_last_word(name: &str) -> Option<(&str, &str)> {
    let last = CAMEL_WORD.find_iter(name).last()?;
    if last.end() != name.len() {
        return None;
    }
    Some((&name[..last.start()], last.as_str()))
}

/// `Item` style: one uppercase letter followed only by lowercase letters.
fn is_title(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| !c.is_uppercase()),
        _ => false,
    }
}

fn title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn inflect_last_word<F>(name: &str, inflect: F) -> String
where
    F: Fn(&str) -> String,
{
    let Some((prefix, word)) = split_last_word(name) else {
        return name.to_string();
    };
    let capitalized = is_title(word);
    let lower = word.to_lowercase();
    let mut inflected = inflect(&lower);
    if inflected.is_empty() {
        inflected = lower;
    }
    if capitalized {
        inflected = title(&inflected);
    }
    format!("{}{}", prefix, inflected)
}
