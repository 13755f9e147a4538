fn main() {
    agency_admin_server::run();
}
