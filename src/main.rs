use icns_builder::IcnsBuilder;

fn main() {
    env_logger::init();

    let result = IcnsBuilder::default()
        .iconset_dir("Aranet4.iconset")
        .remove_iconset(true)
        .build_file("Aranet4.icns");

    // The printed status is the only failure signal; the exit code stays 0.
    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
}
