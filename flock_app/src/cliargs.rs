use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};

#[derive(Parser)]
#[derive(ClapSerde)]
#[command(version, about, long_about = None)]
/// Headless runner for the flocking simulation.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "flock.yaml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Run configuration
///
/// Uses the reference defaults, which can be overwritten by a YAML
/// config file; CLI flags take precedence over both.
pub struct Config {
    #[default(150)]
    #[arg(short = 'n', long)]
    /// number of boids
    pub no_boids: usize,

    #[default(2000)]
    #[arg(long)]
    /// number of simulation ticks to run
    pub ticks: u64,

    #[default(1280.)]
    #[arg(short = 'x', long)]
    pub width: f32,

    #[default(720.)]
    #[arg(short = 'y', long)]
    pub height: f32,

    #[default(true)]
    #[arg(short = 'w', long)]
    /// wall avoidance on/off
    pub walls: bool,

    #[default(120.)]
    #[arg(long = "sens_radius")]
    pub sensing_radius: f32,

    #[default(30.)]
    #[arg(long = "sep_radius")]
    pub separation_radius: f32,

    #[default(65.)]
    #[arg(long = "wall_disp")]
    pub wall_displacement: f32,

    #[default(5.)]
    #[arg(long)]
    pub max_speed: f32,

    #[default(2000.)]
    #[arg(long = "coh_co")]
    pub cohesion_co: f32,

    #[default(7.)]
    #[arg(long = "sep_co")]
    pub separation_co: f32,

    #[default(100.)]
    #[arg(long = "ali_co")]
    pub alignment_co: f32,

    #[default(0.05)]
    #[arg(long)]
    pub noise_amplitude: f32,

    #[default(0)]
    #[arg(long)]
    /// RNG seed, 0 draws a fresh one
    pub seed: u64,

    #[default(4)]
    #[arg(short = 'r', long)]
    /// sample every r-th tick
    pub sample_rate: u64,

    #[default(true)]
    #[arg(short = 's', long)]
    pub save: bool,

    #[default(false)]
    #[arg(short = 't', long)]
    pub save_timestamp: bool,
}
