#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("vessel_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs::{self, File};
    use std::path::{Path, PathBuf};

    use vessel_engine::geom::{ExportTransform, GeomContext, Point2, VesselMesh, write_obj};
    use vessel_engine::params::{CurveType, GenerationParams, ParamKey};
    use vessel_engine::session::ControlPoints;

    const USAGE: &str = r#"vessel_cli (vessel-engine)

USAGE:
  vessel_cli defaults
  vessel_cli generate [options]

OPTIONS (generate):
  --<param> <value>  Set a numeric parameter, e.g. --wallThickness 0.05
                     (width, depth, baseFilletRadius, tension, filletRadius,
                      segments, heightSegments, wallThickness, drainageHoleScale)
  --curve <type>     spline | polyline
  --point <x,y>      Control point; repeat for each point (replaces the defaults)
  --obj <path>       Write the mesh as OBJ (Z-up, millimetres)
  --overwrite        Overwrite an existing OBJ file
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "defaults" => {
                print_defaults();
                Ok(())
            }
            "generate" => cmd_generate(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_defaults() {
        let params = GenerationParams::default();
        println!("curveType {}", params.curve_type);
        for key in ParamKey::ALL {
            println!("{} {}", key.name(), params.get(key));
        }
        for p in ControlPoints::defaults().as_slice() {
            println!("point {},{}", p.x, p.y);
        }
    }

    fn cmd_generate(args: &mut Args) -> Result<(), String> {
        let mut params = GenerationParams::default();
        let mut points: Vec<Point2> = Vec::new();
        let mut obj_path: Option<PathBuf> = None;
        let mut overwrite = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--curve" => {
                    let value = args.value("--curve")?;
                    params.curve_type = value.parse::<CurveType>().map_err(|e| e.to_string())?;
                }
                "--point" => points.push(parse_point(&args.value("--point")?)?),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--overwrite" => overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                flag if flag.starts_with("--") => {
                    let key: ParamKey = flag[2..]
                        .parse()
                        .map_err(|e| format!("{e}\n\n{USAGE}"))?;
                    let raw = args.value(flag)?;
                    let value: f64 = raw
                        .parse()
                        .map_err(|_| format!("invalid number `{raw}` for {flag}"))?;
                    params.set(key, value).map_err(|e| e.to_string())?;
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let points = if points.is_empty() {
            ControlPoints::defaults()
        } else {
            ControlPoints::from_points(&points).map_err(|e| e.to_string())?
        };

        let mut ctx = GeomContext::new();
        let vessel = vessel_engine::geom::generate_with_context(points.as_slice(), &params, &mut ctx)
            .map_err(|e| e.to_string())?;

        print_report(&vessel);

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, &vessel, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        Ok(())
    }

    fn print_report(vessel: &VesselMesh) {
        let [width, height, depth] = vessel.dimensions_mm();
        println!(
            "vessel: vertices={} triangles={} | {}",
            vessel.mesh.vertex_count(),
            vessel.mesh.triangle_count(),
            vessel.diagnostics.summary()
        );
        println!("size: {width:.1} x {height:.1} x {depth:.1} mm");
        for warning in &vessel.diagnostics.warnings {
            eprintln!("warning: {warning}");
        }
    }

    fn parse_point(text: &str) -> Result<Point2, String> {
        let (x, y) = text
            .split_once(',')
            .ok_or_else(|| format!("expected `x,y`, got `{text}`"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid coordinate `{v}` in `{text}`"))
        };
        Ok(Point2::new(parse(x)?, parse(y)?))
    }

    fn write_obj_file(path: &Path, vessel: &VesselMesh, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("vessel");
        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        write_obj(&vessel.mesh, ExportTransform::default(), name, file).map_err(|e| e.to_string())
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
