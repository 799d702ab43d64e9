fn main() {
    println!("cargo:rerun-if-changed=keyer.json");
    println!("cargo:rerun-if-changed=assets/index.html");
    println!("cargo:rerun-if-changed=sdkconfig.defaults");

    // Only the device build needs the ESP-IDF environment; host tests skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
