//! applies one route editing operation to a modification JSON file and
//! writes the result back, or prints the renderable view of the route.
use clap::Parser;
use linesketch::app::EditorApp;

fn main() {
    env_logger::init();
    let args = EditorApp::parse();
    args.op.run(&args)
}
