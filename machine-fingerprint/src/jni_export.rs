use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString};
use tracing::error;

use crate::get_machine_fingerprint;

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_machinefingerprint_NativeFingerprint_getMachineFingerprint<'a>(
    env: JNIEnv<'a>,
    _class: JClass<'a>,
) -> JString<'a> {
    let fingerprint = get_machine_fingerprint();
    match env.new_string(fingerprint) {
        Ok(s) => s,
        Err(e) => {
            // null on the Java side; the pending exception, if any, stays set
            error!(error = %e, "Couldn't create java string for fingerprint");
            JString::from(JObject::null())
        }
    }
}
