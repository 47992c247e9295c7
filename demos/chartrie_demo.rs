//! Console walkthrough of a case-insensitive `CharTrie<char, i32>`.
//!
//! Builds two tries from the same keys inserted in different orders, prints
//! their contents after every insert, then removes a few prefixes.

use anyhow::{ensure, Result};
use chartrie::{CharTrie, ZeroTerminated};

const KEYS: [&str; 8] = ["альфа", "аЛьфа", "аМьфа", "аАьфа", "бета", "гамма", "дельта", "эпсилон"];
const KEYS_OTHER: [&str; 8] = ["дельта", "аМьфа", "аАьфа", "бета", "гамма", "эпсилон", "аЛьфа", "альфа"];
const REMOVALS: [&str; 4] = ["а", "аМ", "бетЯ", "бет"];

const RULE: &str = "-----------------------";

type Trie = CharTrie<char, i32>;

fn key(text: &str) -> ZeroTerminated<char> {
    ZeroTerminated::from(text)
}

fn print_entries(trie: &Trie, indent: &str) {
    for (key, value) in trie {
        println!("{indent}{key} : {value}");
    }
}

fn build(name: &str, keys: &[&str]) -> Trie {
    println!("{RULE} adding key/value pairs to {name}:");
    let mut trie = Trie::new();
    for (value, text) in (1..).zip(keys) {
        println!("{name}.insert(\"{text}\", {value})");
        trie.insert(key(text), value);

        println!("\t\t-- {name} after this insert:");
        print_entries(&trie, "\t\t\t");
    }
    trie
}

fn print_lookups(trie: &Trie, keys: &[&str]) {
    for text in keys {
        println!("{text} : {}", trie.find(key(text)));
    }
}

fn main() -> Result<()> {
    let mut tree1 = build("tree1", &KEYS);
    let tree_other = build("tree_other", &KEYS_OTHER);

    println!("{RULE}");
    print_lookups(&tree1, &KEYS);
    println!("{RULE}");
    print_entries(&tree1, "");
    println!("{RULE}");
    print_lookups(&tree_other, &KEYS_OTHER);
    println!("{RULE}");
    print_entries(&tree_other, "");

    let keys1: Vec<_> = tree1.keys().map(|k| k.to_string().to_lowercase()).collect();
    let keys2: Vec<_> = tree_other.keys().map(|k| k.to_string().to_lowercase()).collect();
    ensure!(keys1 == keys2, "insertion order changed the key set: {keys1:?} vs {keys2:?}");

    println!("{RULE}");
    for text in REMOVALS {
        let outcome = if tree1.remove(key(text)) { "done" } else { "not done" };
        println!("Removing key \"{text}\" - {outcome};");
    }

    println!("{RULE}");
    print_lookups(&tree1, &KEYS);
    print_lookups(&tree1, &REMOVALS);

    ensure!(tree1.len() == 3, "expected 3 keys after removals, found {}", tree1.len());
    Ok(())
}
