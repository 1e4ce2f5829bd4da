use spraycalc::picker::NetPicker;
use spraycalc::*;
use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("demo");

    let result = match command {
        "demo" => demo_quote(),
        "prices" => print_price_table(),
        "net" => write_net(args.get(2).map(PathBuf::from)),
        "quote" => quote(&args[2..]),
        _ => {
            println!("Usage: spraycalc [demo|prices|net [out.svg]|quote W H T PRICE [faces...]]");
            println!("  demo    - Price a 600x800x30 panel, front only, at 30/m² (default)");
            println!("  prices  - Print the configured price table");
            println!("  net     - Write the 2D face picker as SVG (stdout if no path)");
            println!("  quote   - Price one panel; faces default to front");
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config() -> anyhow::Result<EstimatorConfig> {
    EstimatorConfig::load_from_path(EstimatorConfig::default_config_path()?)
}

fn print_element(element: &Element, currency_symbol: &str) {
    let dims = element.dimensions();
    println!(
        "  {:<12} {} x {} x {} mm  faces {:<22} {}  {}",
        element.element_type(),
        format_dimension(dims.width),
        format_dimension(dims.height),
        format_dimension(dims.thickness),
        element.faces_summary(),
        format_area(element.area_m2()),
        format_price(currency_symbol, element.price()),
    );
}

fn demo_quote() -> anyhow::Result<()> {
    println!("spraycalc - Spray Painting Area & Price Estimator");
    println!("=================================================\n");

    let table = PriceTable::builtin()?;
    let controller = FaceToggleController::new(PricingMode::Flat, table, "£", HeadlessPicker);
    let mut estimator = Estimator::new(controller);

    let c = estimator.controller_mut();
    c.set_element_type(Some("Flat".to_string()));
    c.set_width("600");
    c.set_height("800");
    c.set_thickness("30");
    c.set_unit_price("30");

    let readout = estimator.controller().readout();
    println!("Faces: {}", readout.faces_label);
    println!("Area:  {}", readout.area_display);
    println!("Price: {}\n", readout.price_display);

    estimator.add_element()?;

    println!("Project ({} element):", estimator.ledger().len());
    for element in estimator.ledger().iter() {
        print_element(element, "£");
    }
    println!(
        "\nProject area:  {}",
        format_area(estimator.ledger().total_area_m2())
    );
    println!("Project total: {}", format_price("£", estimator.total()));
    Ok(())
}

fn print_price_table() -> anyhow::Result<()> {
    let config = load_config()?;
    let table = config.price_table()?;
    let symbol = &config.currency_symbol;

    println!(
        "{:<32} {:>26}   {:>26}",
        "Element type", "Internal (T1/T2/T3)", "External (T1/T2/T3)"
    );
    for entry in &table.entries {
        let row = |prices: &[f64; 3]| {
            prices
                .iter()
                .map(|p| format_price(symbol, *p))
                .collect::<Vec<_>>()
                .join(" / ")
        };
        println!(
            "{:<32} {:>26}   {:>26}",
            entry.element_type,
            row(&entry.internal),
            row(&entry.external)
        );
    }
    Ok(())
}

fn write_net(path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config()?;
    let session = config.session_store()?.load();

    let mut picker = NetPicker::new();
    picker.set_paint_colour(session.paint_colour());
    picker.update(&Dimensions::default(), &FaceSet::new());
    let svg = picker.to_svg()?;

    match path {
        Some(path) => {
            std::fs::write(&path, svg)?;
            println!("Wrote face picker to {}", path.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn quote(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 4 {
        anyhow::bail!("quote needs width, height, thickness and price per m²");
    }

    let mut config = load_config()?;
    config.pricing_mode = PricingMode::Flat;
    let mut estimator = Estimator::from_config(&config, HeadlessPicker)?;

    let c = estimator.controller_mut();
    if !c.form().has_element_type() {
        c.set_element_type(Some("Flat".to_string()));
    }
    c.set_width(args[0].as_str());
    c.set_height(args[1].as_str());
    c.set_thickness(args[2].as_str());
    c.set_unit_price(args[3].as_str());

    let extra: Vec<&String> = args[4..].iter().collect();
    if !extra.is_empty() {
        // Start from an empty selection when faces are given explicitly.
        c.toggle(Face::Front);
        for token in extra {
            c.toggle_token(token)?;
        }
    }

    let readout = c.readout().clone();
    println!("Faces: {}", readout.faces_label);
    println!("Area:  {}", readout.area_display);
    println!("Price: {}", readout.price_display);

    estimator.add_element()?;
    println!(
        "Total: {}",
        format_price(&config.currency_symbol, estimator.total())
    );
    Ok(())
}
