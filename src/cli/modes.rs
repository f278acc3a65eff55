use crate::chat::ModeRegistry;

pub fn run() {
    for mode in ModeRegistry::builtin().iter() {
        println!("{:<16} {}\n{:<16} {}\n", mode.id, mode.name, "", mode.greeting);
    }
}
