fn main() {
    println!("cargo:rerun-if-env-changed=DOOR_RIG_CALIBRATION");

    // Host builds skip the ESP-IDF environment entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
