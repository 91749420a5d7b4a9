fn main() {
    // ESP-IDF link arguments are only needed for the firmware build; host
    // builds (tests, fuzzing) compile without the toolchain present.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
