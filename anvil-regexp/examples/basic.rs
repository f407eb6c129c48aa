//! cargo run --example basic
use anvil_regexp::{
    engine::EngineKind,
    matcher::{MatchOptions, RegexpMatcher},
};

fn main() -> Result<(), anvil_regexp::Error> {
    // File selection: which candidate paths carry a test source?
    let matcher = RegexpMatcher::new(r"src/test/(.*)\.java$")?;
    for path in ["src/test/CoreTest.java", "src/main/Core.java"] {
        if let Some(groups) = matcher.groups(path)? {
            println!("test source {path}: class {}", groups[1]);
        }
    }

    // Capture-based renaming.
    let mapper = RegexpMatcher::new(r"(\w+)\.java")?;
    println!(
        "{}",
        mapper.substitute("Core.java Util.java", "$1.class", MatchOptions::REPLACE_ALL)?,
    );

    // Engines can be named explicitly, e.g. from build configuration.
    for kind in EngineKind::available() {
        let matcher = RegexpMatcher::builder()
            .engine(kind)
            .pattern("hello")
            .build()?;
        println!(
            "{kind}: {}",
            matcher.is_match_with("HELLO", MatchOptions::CASE_INSENSITIVE)?,
        );
    }
    Ok(())
}
