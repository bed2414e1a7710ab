use colored::Colorize;
use design_patterns::logging;
use design_patterns::structural::flyweight::{MapRenderer, VehicleState, VehicleStatus, VehicleType};

fn main() {
    logging::init();
    println!("{}", "=== Flyweight: map rendering ===".bold());

    let mut renderer = MapRenderer::new();
    renderer.add_vehicle("car1", VehicleType::Car);
    renderer.add_vehicle("bus1", VehicleType::Bus);
    renderer.add_vehicle("truck1", VehicleType::Truck);
    renderer.add_vehicle("car2", VehicleType::Car);

    let san_francisco = (37.7749, -122.4194);
    let updates = [
        ("car1", 45.0, VehicleStatus::Moving, 90.0),
        ("bus1", 30.0, VehicleStatus::Stopped, 180.0),
        ("truck1", 0.0, VehicleStatus::Idle, 0.0),
        ("car2", 60.0, VehicleStatus::Moving, 270.0),
    ];
    for (id, speed, status, heading) in updates {
        renderer.update_vehicle(
            id,
            VehicleState {
                position: san_francisco,
                speed,
                status,
                heading,
            },
        );
    }

    println!("\n{}", "Rendering map".cyan());
    for line in renderer.render_map() {
        println!("  {line}");
    }

    println!("\n{}", "Memory efficiency".cyan());
    println!("  vehicles: {}", renderer.vehicle_count());
    println!("  unique icons: {}", renderer.icon_count());
}
