fn main() {
    sitecat::app::cli::run();
}
