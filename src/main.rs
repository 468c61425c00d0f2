fn main() {
    mpm::run_cli();
}
