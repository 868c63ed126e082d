use clap::Parser;

use crate::bootstrap::bootstrap_cmd;
use crate::post::post_cmd;

mod bootstrap;
mod decompress;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Add a draft blog post to the data dir
    Post(PostArgs),
    /// Bootstrap a new site
    Bootstrap(BootstrapArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct PostArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    author: Option<String>,

    /// Directory holding blogs.json
    #[arg(short, long, default_value = "data")]
    data_dir: String,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BootstrapArgs {
    /// Directory where the new site will be generated
    #[arg(short, long)]
    out_dir: String,
}

fn main() {
    let args = Args::parse();

    let res = match args {
        Args::Post(args) => post_cmd(args),
        Args::Bootstrap(args) => bootstrap_cmd(args),
    };

    if let Err(e) = res {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
