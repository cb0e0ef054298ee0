use std::env;
use std::process;

use log::{info, error};

use quatrot::config::Config;
use quatrot::random::Randf32;
use quatrot::report::{Report, Sweep};

fn main() {
    env_logger::init();

    let cfg = match Config::new(env::args().skip(1).collect()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    info!("{cfg}");

    let report = Report::new(cfg.unit_axis(), cfg.angle, cfg.point);
    println!("{report}");

    let mut ok = true;
    if !report.check(cfg.tolerance) {
        error!(
            "rotation has norm {}, the matrix above is not a pure rotation",
            report.rotation.norm()
        );
        ok = false;
    }
    if !report.agrees(cfg.tolerance) {
        ok = false;
        error!(
            "rotateByQuaternion and rotateByMatrix differ by {:e}",
            report.deviation()
        );
    }

    if cfg.samples > 0 {
        let mut rand = Randf32::seed(cfg.seed);
        let sweep = Sweep::run(&mut rand, cfg.samples, cfg.tolerance);
        println!("\n{sweep}");
        ok &= sweep.passed();
    }

    if !ok {
        process::exit(1);
    }
}
