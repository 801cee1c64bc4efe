use anyhow::{anyhow, bail, Context, Result};
use fog_map::fog::composite::{composite_fog_over_map, project_map, RgbaBuffer};
use fog_map::fog::render::{render_frame, RenderSettings};
use fog_map::fog::settings::FogSettings;
use fog_map::fog::settings_store;
use fog_map::fog::store::{resolve_data_dir, FileStorage, FogPersistence};
use fog_map::fog::transform::{Point, ViewportParams};
use std::path::PathBuf;

const HELP: &str = "\
fog_map settings
  Write the current settings (defaults filled in) to fog_settings.json
  next to the binary.

fog_map render [options]
  Render the saved fog for one viewport and write it as a PNG.

  --map PATH        map image to draw under the fog (sets the image size)
  --image WxH       image size when no map is given
  --viewport WxH    viewport size (default 1280x720)
  --zoom Z          zoom level around the image centre (default: fit)
  --store DIR       fog data folder (default: fog_data next to the binary)
  --out PATH        output file (default fog.png)";

#[derive(Debug, Default)]
struct RenderArgs {
    map: Option<PathBuf>,
    image: Option<(u32, u32)>,
    viewport: Option<(u32, u32)>,
    zoom: Option<f64>,
    store: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let settings = settings_store::load()?;
    fog_map::logging::init(settings.debug_logging, None);

    match args.get(1).map(String::as_str) {
        Some("render") => run_render(&settings, parse_render_args(&args[2..])?),
        Some("settings") => {
            let path = settings_store::save(&settings)?;
            println!("{}", path.display());
            Ok(())
        }
        Some("help") | Some("--help") | Some("-h") | None => {
            println!("{HELP}");
            Ok(())
        }
        Some(other) => bail!("unknown command {other:?}, see `fog_map help`"),
    }
}

fn parse_render_args(args: &[String]) -> Result<RenderArgs> {
    let mut parsed = RenderArgs::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| anyhow!("missing value for {flag}"))?;
        match flag.as_str() {
            "--map" => parsed.map = Some(PathBuf::from(value)),
            "--image" => parsed.image = Some(parse_size(value)?),
            "--viewport" => parsed.viewport = Some(parse_size(value)?),
            "--zoom" => {
                parsed.zoom = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid zoom {value:?}"))?,
                )
            }
            "--store" => parsed.store = Some(PathBuf::from(value)),
            "--out" => parsed.out = Some(PathBuf::from(value)),
            other => bail!("unknown option {other:?}"),
        }
    }
    Ok(parsed)
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let w = w.parse().with_context(|| format!("invalid width in {value:?}"))?;
    let h = h.parse().with_context(|| format!("invalid height in {value:?}"))?;
    Ok((w, h))
}

fn run_render(settings: &FogSettings, args: RenderArgs) -> Result<()> {
    let map = match &args.map {
        Some(path) => {
            let image = image::open(path)
                .with_context(|| format!("open map image {}", path.display()))?
                .to_rgba8();
            let (w, h) = image.dimensions();
            Some(RgbaBuffer::from_pixels(w, h, image.into_raw()))
        }
        None => None,
    };
    let image_size = match (&map, args.image) {
        (Some(map), _) => map.size(),
        (None, Some(size)) => size,
        (None, None) => bail!("either --map or --image is required"),
    };
    let viewport_size = args.viewport.unwrap_or((1280, 720));

    let mut params =
        ViewportParams::fit_image((image_size.0 as f64, image_size.1 as f64), viewport_size);
    if let Some(zoom) = args.zoom {
        let centre = Point::new(viewport_size.0 as f64 / 2.0, viewport_size.1 as f64 / 2.0);
        params = params.zoom_at(centre, zoom);
    }

    let dir = match args.store {
        Some(dir) => dir,
        None => resolve_data_dir()?,
    };
    let persistence = FogPersistence::with_key(
        FileStorage::new(dir).with_quota(settings.storage_quota_bytes),
        settings.storage_key.clone(),
    );
    let store = persistence.load();

    let fog = render_frame(store.all(), &params, RenderSettings::from(settings));
    let output = match &map {
        Some(map) => composite_fog_over_map(&project_map(map, &params), &fog),
        None => fog,
    };

    let out = args.out.unwrap_or_else(|| PathBuf::from("fog.png"));
    let (width, height) = output.size();
    image::RgbaImage::from_raw(width, height, output.pixels)
        .ok_or_else(|| anyhow!("rendered frame does not match {width}x{height}"))?
        .save(&out)
        .with_context(|| format!("write {}", out.display()))?;

    tracing::info!(
        strokes = store.len(),
        zoom = params.zoom(),
        out = %out.display(),
        "fog frame written"
    );
    Ok(())
}
