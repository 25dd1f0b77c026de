fn main() {
    arcade_sim::game::run();
}
