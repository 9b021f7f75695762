/// Example program to print the loaded configuration
///
/// Run with: cargo run -p gradient-config --example print_config

fn main() {
    let config = gradient_config::GradientConfig::load();

    println!("=== Gradient Transition Configuration ===\n");

    println!("Attach Settings:");
    println!("  Direction: {:?}", config.attach.direction);
    println!();

    println!("Render Settings:");
    println!("  Custom Property: {}", config.render.custom_property);
    println!("  Wrapper Class: {}", config.render.wrapper_class);
    println!("  Render Class: {}", config.render.render_class);
    println!();

    println!("Timing Settings:");
    println!("  Duration: {}", config.timing.duration);
    println!("  Delay: {}", config.timing.delay);
    println!("  Timing Function: {}", config.timing.timing_function);
    println!();

    println!("Logging Settings:");
    println!("  Filter: {}", config.logging.filter);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
