use std::env;
use std::fs;

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Deserialize;

use thinfilm::{
    evaluate_film, film_color, gen_lambda_samples, sampling::lambda_fixed, Hash13, Ior, Layer,
    Vector3, CMF_FIT, LAMBDA_STRATEGY, RGB_FIT,
};

#[derive(Copy, Clone, Debug, Deserialize)]
struct MediumConfig {
    n: [f32; 3],
    k: [f32; 3],
}

impl MediumConfig {
    fn ior(&self) -> Ior {
        Ior::new(Vector3::from(self.n), Vector3::from(self.k))
    }
}

#[derive(Clone, Debug, Deserialize)]
struct SwatchConfig {
    width: u32,
    height: u32,
    output: String,
    min_thickness: f32,
    max_thickness: f32,
    incident: MediumConfig,
    film: MediumConfig,
    exit: MediumConfig,
}

const DEFAULT_CONFIG: &str = r#"
width = 800
height = 400
output = "swatch.png"
min_thickness = 100.0
max_thickness = 1100.0

[incident]
n = [1.0, 1.0, 1.0]
k = [0.0, 0.0, 0.0]

# soap-water film
[film]
n = [1.38, 1.38, 1.38]
k = [0.0, 0.0, 0.0]

[exit]
n = [1.0, 1.0, 1.0]
k = [0.0, 0.0, 0.0]
"#;

fn load_config() -> Result<SwatchConfig, String> {
    let text = match env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).map_err(|e| format!("failed to read {}: {}", path, e))?
        }
        None => DEFAULT_CONFIG.to_string(),
    };
    toml::from_str(&text).map_err(|e| format!("failed to parse config: {}", e))
}

fn tonemap(v: f32) -> u8 {
    // gamma 2.2, clamped
    (v.max(0.0).min(1.0).powf(1.0 / 2.2) * 255.0) as u8
}

fn main() -> Result<(), String> {
    let config = load_config()?;
    let (w, h) = (config.width, config.height);

    println!(
        "rendering {}x{} swatch, thickness {}..{} nm",
        w, h, config.min_thickness, config.max_thickness
    );

    let incident = config.incident.ior();
    let film = config.film.ior();
    let exit = config.exit.ior();

    let mut buffer = vec![0u8; (w * h * 3) as usize];
    buffer
        .par_chunks_mut((w * 3) as usize)
        .enumerate()
        .for_each(|(y, row)| {
            // rows sweep incidence angle, columns sweep film thickness
            let sin_theta_0 = y as f32 / h as f32 * 0.95;
            for x in 0..w as usize {
                let f = x as f32 / w as f32;
                let thickness =
                    config.min_thickness * (1.0 - f) + config.max_thickness * f;
                let layers = [
                    Layer::half_space(incident),
                    Layer::new(thickness, film),
                    Layer::half_space(exit),
                ];
                let p = Vector3::new(x as f32, y as f32, 0.5);
                let lambdas = gen_lambda_samples(LAMBDA_STRATEGY, p, &Hash13);
                let rgb = film_color(sin_theta_0, &layers, &lambdas, RGB_FIT, CMF_FIT);
                row[x * 3] = tonemap(rgb.x);
                row[x * 3 + 1] = tonemap(rgb.y);
                row[x * 3 + 2] = tonemap(rgb.z);
            }
        });

    image::save_buffer(
        &config.output,
        &buffer,
        w,
        h,
        image::ColorType::Rgb8,
    )
    .map_err(|e| format!("failed to write {}: {}", config.output, e))?;
    println!("wrote {}", config.output);

    // report the strongest reflectance line of the mid-sweep film at normal
    // incidence, on the deterministic grid
    let mid = 0.5 * (config.min_thickness + config.max_thickness);
    let layers = [
        Layer::half_space(incident),
        Layer::new(mid, film),
        Layer::half_space(exit),
    ];
    let lambdas = lambda_fixed();
    let peak = lambdas
        .iter()
        .max_by_key(|&&l| {
            OrderedFloat(evaluate_film(0.0, &layers, l, RGB_FIT).reflectance)
        })
        .unwrap();
    println!("peak reflectance at {} nm for a {} nm film", peak, mid);

    Ok(())
}
