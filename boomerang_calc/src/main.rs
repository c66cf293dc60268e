//! Interactive text front end for the boomerang curve solver.
//!
//! Prompts for a pose and motion parameters, prints the target point plus a
//! few derived quantities. Run with `RUST_LOG=info` for computation logging.

use std::io::{self, BufRead, Write};

use boomerang_curve::f64::{
    collinear_point, curvature_point, Boomerang, Position, DEFAULT_RADIUS, EPSILON,
};
use log::info;
use uom::si::angle::{degree, radian};
use uom::si::curvature::radian_per_meter;
use uom::si::f64::{Angle, Curvature, Length};
use uom::si::length::meter;

fn clear_screen() {
    // ANSI clear and cursor home
    print!("\x1B[2J\x1B[1;1H");
}

fn display_screen(title: &str) {
    clear_screen();
    println!("=============================");
    println!("       {title}       ");
    println!("=============================");
    println!("1. Collinear calc (straight line)");
    println!("2. Boomerang curve calc (radius)");
    println!("3. Boomerang curve calc (curvature)");
    println!("4. Exit");
    println!("=============================");
    print!("Select an option: ");
}

fn read_line() -> io::Result<String> {
    io::stdout().flush()?;
    let mut line = String::new();
    let num_read = io::stdin().lock().read_line(&mut line)?;
    if num_read == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_string())
}

/// keep asking until the input parses to a finite number
fn prompt_value(label: &str) -> io::Result<f64> {
    loop {
        print!("{label}: ");
        let line = read_line()?;
        match line.parse::<f64>() {
            Ok(value) if value.is_finite() => return Ok(value),
            _ => println!("Not a number, try again."),
        }
    }
}

/// blank accepts the default, non-positive values are rejected here rather
/// than leaning on the solver's fallback
fn prompt_radius() -> io::Result<f64> {
    loop {
        print!("Radius (blank for {DEFAULT_RADIUS}): ");
        let line = read_line()?;
        if line.is_empty() {
            return Ok(DEFAULT_RADIUS);
        }
        match line.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => return Ok(value),
            _ => println!("Radius must be a positive number, try again."),
        }
    }
}

fn prompt_pose() -> io::Result<(Length, Length, Angle)> {
    let x = prompt_value("Current X")?;
    let y = prompt_value("Current Y")?;
    let theta_deg = prompt_value("Current Theta (degrees)")?;
    Ok((
        Length::new::<meter>(x),
        Length::new::<meter>(y),
        Angle::new::<degree>(theta_deg),
    ))
}

/// chord length and bearing from start to target, bearing in degrees
fn derived_quantities(start: &Position, target: &Position) -> (f64, f64) {
    let [x0, y0] = start.as_array_meter();
    let [x1, y1] = target.as_array_meter();
    let chord = start.distance(target).get::<meter>();
    let bearing = Angle::new::<radian>((y1 - y0).atan2(x1 - x0)).get::<degree>();
    (chord, bearing)
}

fn print_target(start: &Position, target: &Position, swept: Option<Angle>) {
    let [x, y] = target.as_array_meter();
    let (chord, bearing) = derived_quantities(start, target);
    println!("=============================");
    println!("New Points");
    println!("=============================");
    println!("NEWX: {x:.6}");
    println!("NEWY: {y:.6}");
    if let Some(swept) = swept {
        println!("Swept arc angle: {:.6} degrees", swept.get::<degree>());
    }
    println!("Chord length: {chord:.6}");
    println!("Bearing to target: {bearing:.6} degrees");
    println!("=============================");
}

fn collinear_calc() -> io::Result<()> {
    clear_screen();
    let (x, y, theta) = prompt_pose()?;
    let distance = prompt_value("How far to travel? (positive is forward, negative is backwards)")?;
    let start = Position { x, y };
    let target = collinear_point(x, y, theta, Length::new::<meter>(distance));
    info!("collinear target {:?}", target.as_array_meter());
    print_target(&start, &target, None);
    Ok(())
}

fn curve_calc() -> io::Result<()> {
    clear_screen();
    let (x, y, theta) = prompt_pose()?;
    let dlead = prompt_value("Lookahead distance along the curve")?;
    let radius = prompt_radius()?;
    let curve = Boomerang::create(x, y, theta, Length::new::<meter>(radius));
    let target = curve.get_xy(Length::new::<meter>(dlead));
    let swept = Angle::new::<radian>(dlead / curve.radius().get::<meter>());
    info!(
        "arc target {:?} for dlead {dlead} radius {radius}",
        target.as_array_meter()
    );
    print_target(&curve.xy0, &target, Some(swept));
    Ok(())
}

fn curvature_calc() -> io::Result<()> {
    clear_screen();
    let (x, y, theta) = prompt_pose()?;
    let dlead = prompt_value("Lookahead distance along the curve")?;
    let kappa = prompt_value("Curvature (1/radius, positive turns left)")?;
    let start = Position { x, y };
    let target = curvature_point(
        x,
        y,
        theta,
        Length::new::<meter>(dlead),
        Curvature::new::<radian_per_meter>(kappa),
    );
    // straight segment sweeps no arc angle
    let swept = if kappa.abs() < EPSILON {
        None
    } else {
        Some(Angle::new::<radian>(dlead * kappa))
    };
    info!(
        "curvature target {:?} for dlead {dlead} kappa {kappa}",
        target.as_array_meter()
    );
    print_target(&start, &target, swept);
    Ok(())
}

fn run() -> io::Result<()> {
    let title = "Main Screen";
    loop {
        display_screen(title);
        let choice = match read_line() {
            Ok(choice) => choice,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) => return Err(e),
        };
        match choice.as_str() {
            "1" => collinear_calc()?,
            "2" => curve_calc()?,
            "3" => curvature_calc()?,
            "4" => {
                println!("Exiting...");
                return Ok(());
            }
            _ => println!("Invalid choice. Please try again."),
        }
        print!("Press Enter to return to the main menu...");
        match read_line() {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

fn main() {
    env_logger::init(); // log to stderr (if you run with `RUST_LOG=debug`)
    if let Err(ref e) = run() {
        println!("{e}");
        std::process::exit(1);
    }
}
