use foxmarks::cli;

fn main() {
    cli::run();
}
